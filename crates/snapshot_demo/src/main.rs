// Snapshot viewer: `snapshot_demo [--config viewer.toml] [FILE...]`
//
// The files become the `input_files` setting; dropping more files on the
// window replaces them.  Arrow keys cycle the selection, R resets the view,
// Shift+R resets view and scale, Escape quits.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use snapshot_app::{App, AppConfig};
use snapshot_core::{HarnessContext, VolatileScene};

#[derive(Parser, Debug, PartialEq)]
#[command(name = "snapshot_demo", version, about = "Camera-interaction viewer")]
struct Args {
    /// TOML file with window, logging and mapper settings
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Files offered to the scene; the arrow keys cycle through them
    files: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    snapshot_core::logging::init(config.log_level_filter())
        .context("another logger is already installed")?;
    log::info!("starting with {} input file(s)", args.files.len());

    App::new(VolatileScene::default())
        .with_config(config)
        .with_context(HarnessContext::with_input_files(args.files))
        .run()?;
    Ok(())
}
