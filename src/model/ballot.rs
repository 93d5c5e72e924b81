use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::auth::AuthenticatedUser;
use crate::model::id::{BallotId, CandidateId};

/// Council seats on every ballot.
pub const COUNCIL_SEATS: usize = 15;
/// Executive seats on every ballot; always a subset of the council picks.
pub const EXECUTIVE_SEATS: usize = 7;

/// One voter's finalised set of selections. Immutable once recorded: ballots
/// are never updated or deleted through normal operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Ballot unique ID.
    pub id: BallotId,
    /// Voter id, also mirrored in the log's duplicate-check set.
    pub voter_id: String,
    /// Council picks: exactly 15 distinct candidate ids.
    pub selected_candidates: Vec<CandidateId>,
    /// Executive picks: exactly 7 distinct ids drawn from the council picks.
    pub executive_candidates: Vec<CandidateId>,
    /// Cast timestamp.
    pub timestamp: DateTime<Utc>,
    /// Voter display name, denormalised at cast time for audit and export.
    #[serde(default)]
    pub voter_name: String,
    /// Voter email, denormalised at cast time for audit and export.
    #[serde(default)]
    pub voter_email: String,
}

impl Ballot {
    /// Construct a ballot for `voter` with a fresh id and timestamp.
    /// Selection validation happens in the ballot engine before this.
    pub fn new(
        voter: &AuthenticatedUser,
        selected: Vec<CandidateId>,
        executive: Vec<CandidateId>,
    ) -> Self {
        Self {
            id: BallotId::new(),
            voter_id: voter.user_id.clone(),
            selected_candidates: selected,
            executive_candidates: executive,
            timestamp: Utc::now(),
            voter_name: voter.display_name.clone(),
            voter_email: voter.email.clone(),
        }
    }
}

/// Per-election append-only vote log: every recorded ballot plus the set of
/// voter ids used as the fast duplicate-check index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotLog {
    /// Voter ids that have already cast a ballot.
    #[serde(default)]
    pub voter_ids: Vec<String>,
    /// Every recorded ballot, in cast order.
    #[serde(default)]
    pub votes: Vec<Ballot>,
}

impl BallotLog {
    /// Has this voter already cast a ballot?
    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.voter_ids.iter().any(|id| id == voter_id)
    }

    /// Number of distinct voters who have cast a ballot.
    pub fn total_votes(&self) -> usize {
        self.voter_ids.len()
    }

    /// Append a ballot and index its voter id.
    pub fn record(&mut self, ballot: Ballot) {
        self.voter_ids.push(ballot.voter_id.clone());
        self.votes.push(ballot);
    }

    /// The duplicate-check set must be exactly the set of voter ids across
    /// the recorded ballots.
    pub fn is_consistent(&self) -> bool {
        let index: HashSet<&str> = self.voter_ids.iter().map(String::as_str).collect();
        let recorded: HashSet<&str> = self.votes.iter().map(|v| v.voter_id.as_str()).collect();
        index == recorded && self.voter_ids.len() == self.votes.len()
    }
}
