//! File-backed logging. The terminal belongs to the game, so nothing is ever
//! written to stdout or stderr once the board is up.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;

/// Environment variable holding the filter directives, e.g. `CODLEC_LOG=debug`.
pub const LOG_ENV: &str = "CODLEC_LOG";
const DEFAULT_DIRECTIVES: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Overrides the default location under the state dir.
    pub path: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(AppDirs::log_path)
    }

    /// `CODLEC_LOG` if set and valid, else `info`.
    pub fn build_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }
}

fn open_log(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Install the global subscriber. Returns the log path in use, or `None` when
/// logging is off because no file could be opened.
pub fn init(config: &LogConfig) -> Option<PathBuf> {
    let path = config.resolved_path()?;
    let file = open_log(&path)?;

    tracing_subscriber::registry()
        .with(config.build_filter())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .ok()?;

    Some(path)
}
