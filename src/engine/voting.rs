use std::collections::HashSet;

use chrono::Utc;
use log::{info, warn};

use crate::error::{Conflict, Error, Result};
use crate::model::{
    AuthenticatedUser, Ballot, BallotLog, CandidateId, ElectionId, ElectionStatus, COUNCIL_SEATS,
    EXECUTIVE_SEATS,
};
use crate::store::{keys, DocumentStore};

use super::{lock, ElectionEngine};

impl<S: DocumentStore> ElectionEngine<S> {
    /// Cast `user`'s ballot. After the eligibility gate, checks run in a
    /// fixed order and the first failure decides the reported reason:
    /// already voted, selection counts, duplicates, executive-subset, then
    /// the voting window. On success the whole log is persisted in a single
    /// atomic write; a failed write leaves the stored log untouched, so a
    /// retry cannot double-count.
    pub fn submit_ballot(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
        selected: Vec<CandidateId>,
        executive: Vec<CandidateId>,
    ) -> Result<Ballot> {
        let election = self.load_election(election_id)?;
        if !election.is_eligible_voter(&user.email) {
            warn!(
                "User {} attempted to vote in election {election_id} but is not eligible",
                user.email
            );
            return Err(Error::Forbidden(
                "You are not authorized to vote in this election".to_string(),
            ));
        }

        let election_lock = self.lock_for(election_id);
        let _guard = lock(&election_lock);

        let mut ballot_log: BallotLog = self.store().get(&keys::votes(election_id));
        if ballot_log.has_voted(&user.user_id) {
            return Err(Error::Conflict(Conflict::AlreadyVoted));
        }
        if selected.len() != COUNCIL_SEATS || executive.len() != EXECUTIVE_SEATS {
            return Err(Error::Conflict(Conflict::WrongSelectionCount));
        }
        if has_duplicates(&selected) || has_duplicates(&executive) {
            return Err(Error::Conflict(Conflict::DuplicateSelection));
        }
        let council: HashSet<CandidateId> = selected.iter().copied().collect();
        if !executive.iter().all(|id| council.contains(id)) {
            return Err(Error::Conflict(Conflict::ExecutiveNotInCouncil));
        }

        let status: ElectionStatus = self.store().get(&keys::status(election_id));
        if !status.is_open_at(Utc::now()) {
            return Err(Error::ElectionClosed);
        }

        // Candidate ids are deliberately not checked against the roster: the
        // slate may change between a voter's fetch and their submit, and
        // unknown ids are ignored at tabulation time instead.
        let ballot = Ballot::new(user, selected, executive);
        ballot_log.record(ballot.clone());
        self.store().put(&keys::votes(election_id), &ballot_log)?;

        info!("Recorded ballot {} for election {election_id}", ballot.id);
        Ok(ballot)
    }
}

fn has_duplicates(ids: &[CandidateId]) -> bool {
    let mut seen = HashSet::with_capacity(ids.len());
    !ids.iter().all(|id| seen.insert(*id))
}
