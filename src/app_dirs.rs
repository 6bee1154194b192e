use directories::ProjectDirs;
use std::path::PathBuf;

use crate::results::RESULTS_FILE;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `~/.local/state/codlec` when `HOME` is set, else the platform data dir.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("codlec"),
            )
        } else {
            ProjectDirs::from("", "", "codlec").map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    /// Default results file; falls back to the working directory.
    pub fn results_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join(RESULTS_FILE))
            .unwrap_or_else(|| PathBuf::from(RESULTS_FILE))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("codlec.log"))
    }
}
