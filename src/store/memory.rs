use std::collections::HashMap;
use std::io;
use std::sync::{Mutex, PoisonError};

use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::DocumentStore;
use crate::error::Result;

/// In-memory document store. Substitutes for [`super::FileStore`] in tests
/// and in embedders that do not want anything on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is there a document at `path`?
    pub fn contains(&self, path: &str) -> bool {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }
}

impl DocumentStore for MemoryStore {
    fn get<T>(&self, path: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        match documents.get(path) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|err| {
                warn!("Malformed document {path}: {err}");
                T::default()
            }),
            None => T::default(),
        }
    }

    fn put<T>(&self, path: &str, document: &T) -> Result<()>
    where
        T: Serialize,
    {
        let value = serde_json::to_value(document).map_err(io::Error::from)?;
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value);
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
        Ok(())
    }
}
