// Re-export SDK modules so binary-internal modules can use crate::api:: and crate::view::
pub(crate) use tagdo_sdk::{api, error, view};

mod app;
mod config;
mod edit_buffer;
mod keys;
mod ui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use config::AppConfig;

fn config_dir() -> PathBuf {
    AppConfig::config_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Sends tracing output to the configured log file; the terminal belongs to the UI.
fn init_logging(config: &AppConfig, dir: &std::path::Path) -> error::Result<()> {
    let path = config.log_path(dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env("TAGDO_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .map_err(|e| error::TodoError::Config(format!("log level: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_dir();
    let path = dir.join("config.toml");

    if !path.exists() {
        AppConfig::write_default(&path)?;
        eprintln!("Created default config at: {}", path.display());
    }

    let config = match AppConfig::load_from_path(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", path.display(), e);
            eprintln!("Fix the config file or delete it to regenerate defaults.");
            return Ok(());
        }
    };

    init_logging(&config, &dir)?;
    tracing::info!(config = %path.display(), "config loaded");

    let mut terminal = ratatui::init();

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let result = app::run(&config, &mut terminal).await;

    ratatui::restore();

    if let Err(e) = result {
        tracing::warn!(error = %e, "exited with error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}
