use log::info;

use crate::error::{Error, Result};
use crate::model::{
    AuthenticatedUser, BallotLog, Candidate, Election, ElectionId, ElectionPatch, ElectionStatus,
    ElectionSummary,
};
use crate::store::{keys, DocumentStore};

use super::{election_not_found, lock, ElectionEngine};

impl<S: DocumentStore> ElectionEngine<S> {
    /// Register a new election. The creator becomes its first admin and
    /// eligible voter, and the empty per-election documents are written up
    /// front so later reads need no special-casing.
    pub fn create_election(
        &self,
        user: &AuthenticatedUser,
        name: &str,
        description: &str,
    ) -> Result<Election> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Election name is required".to_string()));
        }
        let election = Election::new(name.to_string(), description.trim().to_string(), user);

        // Seed the per-election documents before publishing the index entry.
        self.store()
            .put(&keys::candidates(&election.id), &Vec::<Candidate>::new())?;
        self.store()
            .put(&keys::votes(&election.id), &BallotLog::default())?;
        self.store()
            .put(&keys::status(&election.id), &ElectionStatus::default())?;

        let _registry = lock(&self.registry_lock);
        let mut elections: Vec<Election> = self.store().get(keys::ELECTIONS);
        elections.push(election.clone());
        self.store().put(keys::ELECTIONS, &elections)?;

        info!("Created election {} ({})", election.id, election.name);
        Ok(election)
    }

    /// Every registered election, unfiltered. Most consumers want
    /// [`Self::elections_for`] instead.
    pub fn elections(&self) -> Vec<Election> {
        self.store().get(keys::ELECTIONS)
    }

    /// The elections `user` can see, as list summaries.
    pub fn elections_for(&self, user: &AuthenticatedUser) -> Vec<ElectionSummary> {
        self.elections()
            .iter()
            .filter(|e| e.is_member(user))
            .map(|e| e.summarise(user))
            .collect()
    }

    /// Full election details, for admins and eligible voters.
    pub fn election(&self, user: &AuthenticatedUser, election_id: &ElectionId) -> Result<Election> {
        self.load_for_member(election_id, user)
    }

    /// Patch the name, description or membership lists.
    pub fn update_election(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
        patch: ElectionPatch,
    ) -> Result<Election> {
        let _registry = lock(&self.registry_lock);
        let mut elections: Vec<Election> = self.store().get(keys::ELECTIONS);
        let election = elections
            .iter_mut()
            .find(|e| &e.id == election_id)
            .ok_or_else(|| election_not_found(election_id))?;
        if !election.is_admin(&user.user_id) {
            return Err(Error::Forbidden(
                "Admin access required to update election".to_string(),
            ));
        }

        election.apply(patch);
        let updated = election.clone();
        self.store().put(keys::ELECTIONS, &elections)?;
        Ok(updated)
    }

    /// Delete an election. Cascades: the candidate roster, ballot log and
    /// status record go with it.
    pub fn delete_election(
        &self,
        user: &AuthenticatedUser,
        election_id: &ElectionId,
    ) -> Result<()> {
        // Hold both locks so a concurrent per-election mutation cannot write
        // a document back after the cascade has removed it.
        let _registry = lock(&self.registry_lock);
        let election_lock = self.lock_for(election_id);
        let _guard = lock(&election_lock);

        let mut elections: Vec<Election> = self.store().get(keys::ELECTIONS);
        let position = elections
            .iter()
            .position(|e| &e.id == election_id)
            .ok_or_else(|| election_not_found(election_id))?;
        if !elections[position].is_admin(&user.user_id) {
            return Err(Error::Forbidden(
                "Admin access required to delete election".to_string(),
            ));
        }

        elections.remove(position);
        self.store().put(keys::ELECTIONS, &elections)?;
        self.store().remove(&keys::candidates(election_id))?;
        self.store().remove(&keys::votes(election_id))?;
        self.store().remove(&keys::status(election_id))?;

        info!("Deleted election {election_id} and its documents");
        Ok(())
    }
}
