use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{AuthenticatedUser, ElectionId, ElectionStatus, Openness};
use crate::store::{keys, DocumentStore};

use super::{lock, ElectionEngine};

/// Status as reported to members: the computed openness alongside the raw
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub is_open: bool,
    pub openness: Openness,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl<S: DocumentStore> ElectionEngine<S> {
    /// Current status. Openness is recomputed from the wall clock on every
    /// call.
    pub fn status(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<StatusView> {
        self.load_for_member(election_id, user)?;
        let status: ElectionStatus = self.store().get(&keys::status(election_id));
        let now = Utc::now();
        Ok(StatusView {
            is_open: status.is_open_at(now),
            openness: status.openness(now),
            start_time: status.start_time,
            end_time: status.end_time,
        })
    }

    /// Flip the manual open flag and return its new value. Meaningful for
    /// elections without a schedule; a set window keeps precedence.
    pub fn toggle_election(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<bool> {
        self.load_for_admin(election_id, user)?;
        let election_lock = self.lock_for(election_id);
        let _guard = lock(&election_lock);

        let mut status: ElectionStatus = self.store().get(&keys::status(election_id));
        let is_open = status.toggle();
        self.store().put(&keys::status(election_id), &status)?;

        info!(
            "Election {election_id} manually {}",
            if is_open { "opened" } else { "closed" }
        );
        Ok(is_open)
    }

    /// Set the scheduled voting window. Forces the manual flag off.
    pub fn schedule_election(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<()> {
        self.load_for_admin(election_id, user)?;
        let election_lock = self.lock_for(election_id);
        let _guard = lock(&election_lock);

        let mut status: ElectionStatus = self.store().get(&keys::status(election_id));
        status.schedule(start, end)?;
        self.store().put(&keys::status(election_id), &status)?;

        info!("Election {election_id} scheduled for {start} to {end}");
        Ok(())
    }
}


#[cfg(test)]
impl StatusView {
    fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start_time.zip(self.end_time)
    }
}
