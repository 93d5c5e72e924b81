use serde::{Deserialize, Serialize};

use crate::model::id::CandidateId;

/// One candidate's aggregated vote counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTally {
    pub id: CandidateId,
    pub name: String,
    pub council_votes: u64,
    pub executive_votes: u64,
}

/// The aggregated outcome of an election. While the election is open this
/// carries zero counts and no per-candidate rows; results are never
/// partially revealed during voting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    pub is_open: bool,
    pub total_votes: u64,
    pub results: Vec<CandidateTally>,
}

impl ElectionResults {
    /// Order entries by council votes descending, executive votes
    /// descending, then candidate id ascending. The id tie-break makes the
    /// ordering a total order, so repeated tallies of unchanged data agree.
    pub(crate) fn sort(entries: &mut [CandidateTally]) {
        entries.sort_by(|a, b| {
            b.council_votes
                .cmp(&a.council_votes)
                .then(b.executive_votes.cmp(&a.executive_votes))
                .then(a.id.cmp(&b.id))
        });
    }
}
