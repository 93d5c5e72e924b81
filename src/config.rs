use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::store::FileStore;

/// Application configuration. The embedding layer deserialises this from
/// whatever source it favours (config file, environment) and hands it in;
/// nothing here is read from global state.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding every stored document.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Build the file store rooted at the configured data directory.
    pub fn open_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}
