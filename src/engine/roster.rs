use chrono::Utc;
use log::info;

use crate::error::{Conflict, Error, Result};
use crate::model::{
    AuthenticatedUser, Candidate, CandidateId, ElectionId, ElectionStatus, NewCandidate,
    PublicCandidate,
};
use crate::store::{keys, DocumentStore};

use super::{lock, ElectionEngine};

impl<S: DocumentStore> ElectionEngine<S> {
    /// The candidate slate as voters see it, private profiles erased.
    pub fn candidates(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<Vec<PublicCandidate>> {
        self.load_for_member(election_id, user)?;
        let roster: Vec<Candidate> = self.store().get(&keys::candidates(election_id));
        Ok(roster.into_iter().map(Candidate::erase_private).collect())
    }

    /// The full slate including private profiles. Admin only.
    pub fn candidates_full(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<Vec<Candidate>> {
        self.load_for_admin(election_id, user)?;
        Ok(self.store().get(&keys::candidates(election_id)))
    }

    /// Add a candidate to the roster of a closed election. The new id is
    /// `max + 1` over the stored slate (1 for an empty slate) and is never
    /// reused, so historical ballots keep referring to removed candidates.
    pub fn add_candidate(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
        new: NewCandidate,
    ) -> Result<Candidate> {
        self.load_for_admin(election_id, user)?;
        let election_lock = self.lock_for(election_id);
        let _guard = lock(&election_lock);

        self.ensure_roster_unlocked(election_id)?;

        let new = new.trimmed();
        if new.name.is_empty() {
            return Err(Error::InvalidInput(
                "Candidate name is required".to_string(),
            ));
        }
        if new.bio.is_empty() {
            return Err(Error::InvalidInput("Candidate bio is required".to_string()));
        }

        let mut roster: Vec<Candidate> = self.store().get(&keys::candidates(election_id));
        let id = roster.iter().map(|c| c.id).max().map_or(1, |max| max + 1);
        let candidate = new.into_candidate(id);
        roster.push(candidate.clone());
        self.store().put(&keys::candidates(election_id), &roster)?;

        info!(
            "Added candidate {id} ({}) to election {election_id}",
            candidate.name
        );
        Ok(candidate)
    }

    /// Remove a candidate from the roster of a closed election. Their id is
    /// retired, never reassigned.
    pub fn remove_candidate(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
        candidate_id: CandidateId,
    ) -> Result<()> {
        self.load_for_admin(election_id, user)?;
        let election_lock = self.lock_for(election_id);
        let _guard = lock(&election_lock);

        self.ensure_roster_unlocked(election_id)?;

        let mut roster: Vec<Candidate> = self.store().get(&keys::candidates(election_id));
        let before = roster.len();
        roster.retain(|c| c.id != candidate_id);
        if roster.len() == before {
            return Err(Error::NotFound(format!(
                "No candidate with ID {candidate_id}"
            )));
        }
        self.store().put(&keys::candidates(election_id), &roster)?;

        info!("Removed candidate {candidate_id} from election {election_id}");
        Ok(())
    }

    /// The roster may only change while the election is effectively closed.
    fn ensure_roster_unlocked(&self, election_id: &ElectionId) -> Result<()> {
        let status: ElectionStatus = self.store().get(&keys::status(election_id));
        if status.is_open_at(Utc::now()) {
            return Err(Error::Conflict(Conflict::RosterLocked));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    use crate::engine::testing::engine_with_election;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let (engine, admin, election_id) = engine_with_election();

        for name in ["Anna", "Berit", "Carl"] {
            engine
                .add_candidate(&admin, &election_id, NewCandidate::example(name))
                .unwrap();
        }
        engine.remove_candidate(&admin, &election_id, 3).unwrap();

        let next = engine
            .add_candidate(&admin, &election_id, NewCandidate::example("Dagny"))
            .unwrap();
        assert_eq!(next.id, 4);

        let ids: Vec<CandidateId> = engine
            .candidates(&admin, &election_id)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn empty_fields_are_invalid_input_and_consume_no_id() {
        let (engine, admin, election_id) = engine_with_election();

        let no_name = NewCandidate {
            name: "   ".to_string(),
            bio: "present".to_string(),
            ..NewCandidate::default()
        };
        assert!(matches!(
            engine.add_candidate(&admin, &election_id, no_name),
            Err(Error::InvalidInput(_))
        ));

        let no_bio = NewCandidate {
            name: "Anna".to_string(),
            bio: "\t".to_string(),
            ..NewCandidate::default()
        };
        assert!(matches!(
            engine.add_candidate(&admin, &election_id, no_bio),
            Err(Error::InvalidInput(_))
        ));

        // The next successful add still gets the first id.
        let candidate = engine
            .add_candidate(&admin, &election_id, NewCandidate::example("Anna"))
            .unwrap();
        assert_eq!(candidate.id, 1);
    }

    #[test]
    fn roster_is_locked_while_the_election_is_open() {
        let (engine, admin, election_id) = engine_with_election();
        engine
            .add_candidate(&admin, &election_id, NewCandidate::example("Anna"))
            .unwrap();
        engine.toggle_election(&admin, &election_id).unwrap();

        // Rejected before field validation even runs.
        let invalid = NewCandidate::default();
        assert!(matches!(
            engine.add_candidate(&admin, &election_id, invalid),
            Err(Error::Conflict(Conflict::RosterLocked))
        ));
        assert!(matches!(
            engine.remove_candidate(&admin, &election_id, 1),
            Err(Error::Conflict(Conflict::RosterLocked))
        ));
    }

    #[test]
    fn roster_lock_follows_effective_openness_not_the_manual_flag() {
        let (engine, admin, election_id) = engine_with_election();
        let now = Utc::now();
        engine
            .schedule_election(
                &admin,
                &election_id,
                now - Duration::hours(1),
                now + Duration::hours(1),
            )
            .unwrap();

        // Manual flag is off, but the window is live.
        assert!(matches!(
            engine.add_candidate(&admin, &election_id, NewCandidate::example("Anna")),
            Err(Error::Conflict(Conflict::RosterLocked))
        ));
    }

    #[test]
    fn remove_of_an_unknown_candidate_is_not_found() {
        let (engine, admin, election_id) = engine_with_election();
        assert!(matches!(
            engine.remove_candidate(&admin, &election_id, 42),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn private_profiles_are_admin_only() {
        let (engine, admin, election_id) = engine_with_election();
        engine
            .add_candidate(&admin, &election_id, NewCandidate::example("Anna"))
            .unwrap();
        let voter = AuthenticatedUser::example2();
        engine
            .update_election(
                &admin,
                &election_id,
                crate::model::ElectionPatch {
                    eligible_voter_emails: Some(vec![admin.email.clone(), voter.email.clone()]),
                    ..Default::default()
                },
            )
            .unwrap();

        let public = engine.candidates(&voter, &election_id).unwrap();
        assert_eq!(public.len(), 1);

        let full = engine.candidates_full(&admin, &election_id).unwrap();
        assert_eq!(full[0].private.email, "anna@example.com");

        assert!(matches!(
            engine.candidates_full(&voter, &election_id),
            Err(Error::Forbidden(_))
        ));
    }
}
