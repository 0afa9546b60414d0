use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use snapshot_core::{HarnessContext, MapperSettings, Scene};

use crate::error::{AppError, ConfigError};

/// Configuración inicial de la ventana y del visor.
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```toml
/// title = "Snapshot"
/// width = 1024
///
/// [mapper]
/// rotate_gain = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// MSAA sample count for the presentation target.
    pub samples: u32,
    pub vsync: bool,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub mapper: MapperSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Snapshot".to_string(),
            width: 800,
            height: 800,
            samples: 4,
            vsync: true,
            log_level: "info".to_string(),
            mapper: MapperSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parsed `log_level`; unknown names fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Entry point.  Builder-style configuration, then [`run`](App::run).
pub struct App<S: Scene> {
    config: AppConfig,
    context: HarnessContext,
    scene: S,
}

impl<S: Scene + 'static> App<S> {
    pub fn new(scene: S) -> Self {
        Self {
            config: AppConfig::default(),
            context: HarnessContext::with_input_files(Vec::new()),
            scene,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_context(mut self, context: HarnessContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Ejecuta el bucle principal hasta que la ventana se cierra.
    pub fn run(self) -> Result<(), AppError> {
        crate::runner::run_internal(self.config, self.scene, self.context)
    }
}
