use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings that survive between runs. Every field is optional; unset means
/// "use the built-in default".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub word_list: Option<PathBuf>,
    pub hard_word_list: Option<PathBuf>,
    pub results_path: Option<PathBuf>,
}

impl Config {
    /// Values set in `overrides` win over the ones in `self`.
    pub fn merged_with(&self, overrides: &Config) -> Config {
        Config {
            word_list: overrides.word_list.clone().or_else(|| self.word_list.clone()),
            hard_word_list: overrides
                .hard_word_list
                .clone()
                .or_else(|| self.hard_word_list.clone()),
            results_path: overrides
                .results_path
                .clone()
                .or_else(|| self.results_path.clone()),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "codlec") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("codlec_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|err| {
                tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config");
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            word_list: Some("/usr/share/codlec/palavras.txt".into()),
            hard_word_list: None,
            results_path: Some("/tmp/resultados.json".into()),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn malformed_or_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let missing = FileConfigStore::with_path(dir.path().join("missing.json"));
        assert_eq!(missing.load(), Config::default());

        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"results_path": "r.json"}"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.results_path, Some(PathBuf::from("r.json")));
        assert_eq!(cfg.word_list, None);
    }

    #[test]
    fn overrides_win() {
        let saved = Config {
            word_list: Some("a.txt".into()),
            hard_word_list: Some("b.txt".into()),
            results_path: None,
        };
        let cli = Config {
            word_list: Some("c.txt".into()),
            hard_word_list: None,
            results_path: Some("r.json".into()),
        };

        let merged = saved.merged_with(&cli);
        assert_eq!(merged.word_list, Some(PathBuf::from("c.txt")));
        assert_eq!(merged.hard_word_list, Some(PathBuf::from("b.txt")));
        assert_eq!(merged.results_path, Some(PathBuf::from("r.json")));
    }
}
