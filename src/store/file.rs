use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use super::DocumentStore;
use crate::error::Result;

/// File-backed document store: one JSON file per document under a data
/// directory. Writes land in a temporary file in the destination directory
/// and are renamed over the target, so a read always sees a complete
/// document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.split('/') {
            full.push(segment);
        }
        full.set_extension("json");
        full
    }
}

impl DocumentStore for FileStore {
    fn get<T>(&self, path: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let file = self.file_path(path);
        let raw = match fs::read(&file) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                warn!("Failed to read document {}: {err}", file.display());
                return T::default();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(document) => document,
            Err(err) => {
                warn!("Malformed document {}: {err}", file.display());
                T::default()
            }
        }
    }

    fn put<T>(&self, path: &str, document: &T) -> Result<()>
    where
        T: Serialize,
    {
        let file = self.file_path(path);
        let dir = file.parent().expect("document paths are never empty");
        fs::create_dir_all(dir)?;

        let json = serde_json::to_vec_pretty(document).map_err(io::Error::from)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&file).map_err(|err| err.error)?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        match fs::remove_file(self.file_path(path)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
