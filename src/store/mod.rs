//! Whole-document persistence. Every stored record is a complete JSON
//! document addressed by a slash-separated logical path; there are no
//! partial updates and no transactions beyond an atomic whole-document
//! replace.

pub use file::FileStore;
pub use memory::MemoryStore;

mod file;
mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub trait DocumentStore: Send + Sync {
    /// Fetch the document at `path`. A missing document yields the type's
    /// default; malformed content also yields the default, with the anomaly
    /// logged rather than surfaced, so a damaged file can never take reads
    /// down with it.
    fn get<T>(&self, path: &str) -> T
    where
        T: DeserializeOwned + Default;

    /// Atomically replace the document at `path`. Concurrent readers observe
    /// either the previous or the new document in full, never a torn write.
    fn put<T>(&self, path: &str, document: &T) -> Result<()>
    where
        T: Serialize;

    /// Delete the document at `path`. Deleting a missing document succeeds.
    fn remove(&self, path: &str) -> Result<()>;
}

/// Document path convention: one global index plus a namespace per election.
pub mod keys {
    use crate::model::ElectionId;

    /// The global election index document.
    pub const ELECTIONS: &str = "elections";

    /// An election's candidate roster.
    pub fn candidates(election_id: &ElectionId) -> String {
        format!("elections/{election_id}/candidates")
    }

    /// An election's ballot log.
    pub fn votes(election_id: &ElectionId) -> String {
        format!("elections/{election_id}/votes")
    }

    /// An election's status record.
    pub fn status(election_id: &ElectionId) -> String {
        format!("elections/{election_id}/status")
    }
}
