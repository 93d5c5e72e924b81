//! The election engine: registry, candidate roster, status machine, ballot
//! submission, tabulation and export, all over an injected document store.
//!
//! Every mutation is a whole-document read-modify-write, so each election
//! gets its own mutex (created on first access) and mutations of a given
//! election's documents run serialised. Elections are otherwise fully
//! independent units of concurrency; only the global index document has its
//! own registry-wide lock.

pub use status::StatusView;

mod export;
mod registry;
mod roster;
mod status;
mod tally;
mod voting;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::model::{AuthenticatedUser, Election, ElectionId};
use crate::store::{keys, DocumentStore};

pub struct ElectionEngine<S> {
    store: S,
    /// Per-election mutexes serialising read-modify-write cycles.
    election_locks: Mutex<HashMap<ElectionId, Arc<Mutex<()>>>>,
    /// Serialises mutations of the global election index document.
    registry_lock: Mutex<()>,
}

impl<S: DocumentStore> ElectionEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            election_locks: Mutex::new(HashMap::new()),
            registry_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The mutex guarding `election_id`'s documents.
    fn lock_for(&self, election_id: &ElectionId) -> Arc<Mutex<()>> {
        let mut locks = lock(&self.election_locks);
        locks.entry(election_id.clone()).or_default().clone()
    }

    /// Load the election or fail with `NotFound`.
    pub(crate) fn load_election(&self, election_id: &ElectionId) -> Result<Election> {
        let elections: Vec<Election> = self.store.get(keys::ELECTIONS);
        elections
            .into_iter()
            .find(|e| &e.id == election_id)
            .ok_or_else(|| election_not_found(election_id))
    }

    /// Load the election and require `user` to be one of its admins.
    pub(crate) fn load_for_admin(
        &self,
        election_id: &ElectionId,
        user: &AuthenticatedUser,
    ) -> Result<Election> {
        let election = self.load_election(election_id)?;
        if !election.is_admin(&user.user_id) {
            return Err(Error::Forbidden("Admin access required".to_string()));
        }
        Ok(election)
    }

    /// Load the election and require `user` to be an admin or an eligible
    /// voter.
    pub(crate) fn load_for_member(
        &self,
        election_id: &ElectionId,
        user: &AuthenticatedUser,
    ) -> Result<Election> {
        let election = self.load_election(election_id)?;
        if !election.is_member(user) {
            return Err(Error::Forbidden(
                "Access denied to this election".to_string(),
            ));
        }
        Ok(election)
    }
}

pub(crate) fn election_not_found(election_id: &ElectionId) -> Error {
    Error::NotFound(format!("No election with ID {election_id}"))
}

/// Lock a mutex, riding over poisoning: the guarded state is a plain map or
/// unit value that stays valid even if a holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
