use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown TODOS_STORAGE backend {0:?} (expected \"file\" or \"memory\")")]
    UnknownBackend(String),
}

/// Runtime settings, read from the environment after `.env` has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("TODOS_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".todos"));
        let storage = match lookup("TODOS_STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };
        let log_file = lookup("TODOS_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| match storage {
                StorageBackend::File => data_dir.join("todos.log"),
                // nothing else touches the data dir in memory mode
                StorageBackend::Memory => std::env::temp_dir().join("todos.log"),
            });
        Ok(Self { data_dir, storage, log_file })
    }
}
