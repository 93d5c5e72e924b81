use std::collections::{HashMap, HashSet};
use std::iter;

use serde::{Deserialize, Serialize};

use crate::model::ballot::BallotLog;
use crate::model::candidate::PublicCandidate;
use crate::model::id::CandidateId;

/// Executive name columns in an export row.
const EXECUTIVE_COLUMNS: usize = 7;
/// Remaining-council name columns in an export row.
const COUNCIL_COLUMNS: usize = 8;

/// The ballot log rendered as a flat table for administrative download: one
/// row per ballot, voter identity first, then the executive picks, then the
/// remaining council picks, padded with empty cells. A pure projection;
/// nothing is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesExport {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl VotesExport {
    pub fn new(log: &BallotLog, roster: &[PublicCandidate]) -> Self {
        let names: HashMap<CandidateId, &str> =
            roster.iter().map(|c| (c.id, c.name.as_str())).collect();

        let mut header = vec!["Voter Name".to_string()];
        header.extend((1..=EXECUTIVE_COLUMNS).map(|i| format!("Executive {i}")));
        header.extend((1..=COUNCIL_COLUMNS).map(|i| format!("Council {i}")));

        let rows = log
            .votes
            .iter()
            .map(|vote| {
                let voter = if vote.voter_email.is_empty() {
                    format!("Unknown Email ({})", vote.voter_id)
                } else {
                    vote.voter_email.clone()
                };
                let mut row = vec![voter];

                let executive = vote
                    .executive_candidates
                    .iter()
                    .take(EXECUTIVE_COLUMNS)
                    .map(|id| display_name(&names, *id));
                extend_padded(&mut row, executive, EXECUTIVE_COLUMNS);

                let executive_picks: HashSet<CandidateId> =
                    vote.executive_candidates.iter().copied().collect();
                let council = vote
                    .selected_candidates
                    .iter()
                    .filter(|id| !executive_picks.contains(id))
                    .take(COUNCIL_COLUMNS)
                    .map(|id| display_name(&names, *id));
                extend_padded(&mut row, council, COUNCIL_COLUMNS);

                row
            })
            .collect();

        Self { header, rows }
    }
}

fn display_name(names: &HashMap<CandidateId, &str>, id: CandidateId) -> String {
    names
        .get(&id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Unknown ID: {id}"))
}

/// Append `cells` to the row, padded with empty strings up to `width`.
fn extend_padded(row: &mut Vec<String>, cells: impl Iterator<Item = String>, width: usize) {
    let start = row.len();
    row.extend(cells);
    let fill = width - (row.len() - start);
    row.extend(iter::repeat(String::new()).take(fill));
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::auth::AuthenticatedUser;
    use crate::model::ballot::Ballot;
    use crate::model::candidate::NewCandidate;

    fn roster(names: &[&str]) -> Vec<PublicCandidate> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                NewCandidate::example(name)
                    .into_candidate(i as CandidateId + 1)
                    .erase_private()
            })
            .collect()
    }

    #[test]
    fn header_names_every_column() {
        let export = VotesExport::new(&BallotLog::default(), &[]);
        assert_eq!(export.header.len(), 16);
        assert_eq!(export.header[0], "Voter Name");
        assert_eq!(export.header[1], "Executive 1");
        assert_eq!(export.header[7], "Executive 7");
        assert_eq!(export.header[8], "Council 1");
        assert_eq!(export.header[15], "Council 8");
        assert!(export.rows.is_empty());
    }

    #[test]
    fn rows_split_executive_from_remaining_council() {
        let roster = roster(&["Anna", "Berit", "Carl"]);
        let mut log = BallotLog::default();
        log.record(Ballot::new(
            &AuthenticatedUser::example(),
            (1..=15).collect(),
            (1..=7).collect(),
        ));

        let export = VotesExport::new(&log, &roster);
        let row = &export.rows[0];
        assert_eq!(row.len(), 16);
        assert_eq!(row[0], "alice@example.com");
        // Executive cells: the first seven picks.
        assert_eq!(row[1], "Anna");
        assert_eq!(row[2], "Berit");
        assert_eq!(row[3], "Carl");
        assert_eq!(row[4], "Unknown ID: 4");
        // Council cells: picks 8..=15, which never repeat the executive set.
        assert_eq!(row[8], "Unknown ID: 8");
        assert_eq!(row[15], "Unknown ID: 15");
    }

    #[test]
    fn short_selections_are_padded_with_empty_cells() {
        // Ballots always carry 15/7 picks through the engine, but the
        // projection itself tolerates partial data from older logs.
        let roster = roster(&["Anna"]);
        let mut log = BallotLog::default();
        let mut ballot = Ballot::new(&AuthenticatedUser::example(), vec![1, 9], vec![1]);
        ballot.voter_email = String::new();
        log.votes.push(ballot);
        log.voter_ids.push(AuthenticatedUser::example().user_id);

        let export = VotesExport::new(&log, &roster);
        let row = &export.rows[0];
        assert_eq!(row[0], "Unknown Email (google-oauth2|100001)");
        assert_eq!(row[1], "Anna");
        assert_eq!(row[2], "");
        assert_eq!(row[7], "");
        assert_eq!(row[8], "Unknown ID: 9");
        assert_eq!(row[9], "");
        assert_eq!(row[15], "");
    }
}
