use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The platform window could not be created.
    #[error("error initializing window: {0}")]
    Initialization(String),
    #[error("no suitable graphics adapter found")]
    AdapterUnavailable,
    #[error("graphics setup failed: {0}")]
    Graphics(String),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
