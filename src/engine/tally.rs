use std::collections::HashMap;

use chrono::Utc;
use log::warn;

use crate::error::Result;
use crate::model::{
    AuthenticatedUser, BallotLog, Candidate, CandidateId, CandidateTally, ElectionId,
    ElectionResults, ElectionStatus,
};
use crate::store::{keys, DocumentStore};

use super::ElectionEngine;

impl<S: DocumentStore> ElectionEngine<S> {
    /// Aggregate the recorded ballots into ranked per-candidate counts.
    /// While the election is effectively open this returns zero counts and
    /// no rows; results are never partially revealed during voting.
    pub fn tally(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<ElectionResults> {
        self.load_for_member(election_id, user)?;

        let status: ElectionStatus = self.store().get(&keys::status(election_id));
        if status.is_open_at(Utc::now()) {
            return Ok(ElectionResults {
                is_open: true,
                total_votes: 0,
                results: Vec::new(),
            });
        }

        let ballot_log: BallotLog = self.store().get(&keys::votes(election_id));
        let roster: Vec<Candidate> = self.store().get(&keys::candidates(election_id));

        let mut entries: Vec<CandidateTally> = roster
            .iter()
            .map(|c| CandidateTally {
                id: c.id,
                name: c.name.clone(),
                council_votes: 0,
                executive_votes: 0,
            })
            .collect();
        let by_id: HashMap<CandidateId, usize> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id, index))
            .collect();

        for vote in &ballot_log.votes {
            for id in &vote.selected_candidates {
                match by_id.get(id) {
                    Some(&index) => entries[index].council_votes += 1,
                    // Removed or never-existing candidate: zero-weight, but
                    // worth an inconsistency note in the logs.
                    None => warn!(
                        "Ballot {} in election {election_id} selects unknown candidate {id}",
                        vote.id
                    ),
                }
            }
            for id in &vote.executive_candidates {
                if let Some(&index) = by_id.get(id) {
                    entries[index].executive_votes += 1;
                }
            }
        }

        ElectionResults::sort(&mut entries);
        Ok(ElectionResults {
            is_open: false,
            total_votes: ballot_log.total_votes() as u64,
            results: entries,
        })
    }
}
