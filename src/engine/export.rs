use crate::error::Result;
use crate::model::{AuthenticatedUser, BallotLog, Candidate, ElectionId, VotesExport};
use crate::store::{keys, DocumentStore};

use super::ElectionEngine;

impl<S: DocumentStore> ElectionEngine<S> {
    /// Render the ballot log as a flat table for administrative download.
    pub fn export_votes(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<VotesExport> {
        self.load_for_admin(election_id, user)?;
        let ballot_log: BallotLog = self.store().get(&keys::votes(election_id));
        let roster: Vec<Candidate> = self.store().get(&keys::candidates(election_id));
        let public: Vec<_> = roster.into_iter().map(Candidate::erase_private).collect();
        Ok(VotesExport::new(&ballot_log, &public))
    }

    /// The raw ballot log document, for the JSON download.
    pub fn ballot_log(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<BallotLog> {
        self.load_for_admin(election_id, user)?;
        Ok(self.store().get(&keys::votes(election_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::engine::testing::engine_with_election;
    use crate::error::Error;
    use crate::model::{CandidateId, NewCandidate};

    #[test]
    fn export_pairs_voters_with_candidate_names() {
        let (engine, admin, election_id) = engine_with_election();
        for name in ["Anna", "Berit", "Carl"] {
            engine
                .add_candidate(&admin, &election_id, NewCandidate::example(name))
                .unwrap();
        }
        engine.toggle_election(&admin, &election_id).unwrap();
        let council: Vec<CandidateId> = (1..=15).collect();
        let executive: Vec<CandidateId> = (1..=7).collect();
        engine
            .submit_ballot(&admin, &election_id, council, executive)
            .unwrap();

        let export = engine.export_votes(&admin, &election_id).unwrap();
        assert_eq!(export.rows.len(), 1);
        let row = &export.rows[0];
        assert_eq!(row[0], admin.email);
        assert_eq!(row[1], "Anna");
        assert_eq!(row[8], "Unknown ID: 8");

        let log = engine.ballot_log(&admin, &election_id).unwrap();
        assert!(log.is_consistent());
        assert_eq!(log.total_votes(), 1);
    }

    #[test]
    fn exports_are_admin_only() {
        let (engine, _admin, election_id) = engine_with_election();
        let outsider = AuthenticatedUser::outsider_example();

        assert!(matches!(
            engine.export_votes(&outsider, &election_id),
            Err(Error::Forbidden(_))
        ));
        assert!(matches!(
            engine.ballot_log(&outsider, &election_id),
            Err(Error::Forbidden(_))
        ));
    }
}
