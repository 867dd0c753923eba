//! Logging setup

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber
///
/// Logs always go to stdout. With `log_dir` set, an uncolored copy is written
/// to `<log_dir>/<%Y%m%d_%H%M%S>.log`, whose path is returned.
pub fn init(log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let path = dir.join(format!(
                "{}.log",
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            ));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;

            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sluice=info".into()),
        )
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(log_path)
}
