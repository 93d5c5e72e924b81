use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::auth::AuthenticatedUser;
use crate::model::id::ElectionId;

/// A single voting contest, as stored in the global election index.
///
/// The `is_open`/window fields mirror the per-election status record for
/// the benefit of index consumers; the status record is authoritative for
/// every openness decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    /// Election unique ID.
    pub id: ElectionId,
    /// Election name.
    pub name: String,
    /// Free-text description shown to voters.
    pub description: String,
    /// User id of the creator.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Emails allowed to vote. Matched exactly, case-sensitive.
    #[serde(default)]
    pub eligible_voter_emails: Vec<String>,
    /// User ids with admin rights over this election.
    #[serde(default)]
    pub admin_user_ids: Vec<String>,
}

impl Election {
    /// Register a new election. The creator is always seeded into both the
    /// admin and eligible-voter lists.
    pub fn new(name: String, description: String, creator: &AuthenticatedUser) -> Self {
        Self {
            id: ElectionId::new(),
            name,
            description,
            created_by: creator.user_id.clone(),
            created_at: Utc::now(),
            is_open: false,
            start_time: None,
            end_time: None,
            eligible_voter_emails: vec![creator.email.clone()],
            admin_user_ids: vec![creator.user_id.clone()],
        }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_user_ids.iter().any(|id| id == user_id)
    }

    pub fn is_eligible_voter(&self, email: &str) -> bool {
        self.eligible_voter_emails.iter().any(|e| e == email)
    }

    /// Can `user` see this election at all?
    pub fn is_member(&self, user: &AuthenticatedUser) -> bool {
        self.is_admin(&user.user_id) || self.is_eligible_voter(&user.email)
    }

    /// Apply an admin patch. Only the name, description and membership
    /// lists are updatable this way.
    pub fn apply(&mut self, patch: ElectionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(emails) = patch.eligible_voter_emails {
            self.eligible_voter_emails = emails;
        }
        if let Some(admins) = patch.admin_user_ids {
            self.admin_user_ids = admins;
        }
    }

    /// Summary row for `user`'s election list.
    pub fn summarise(&self, user: &AuthenticatedUser) -> ElectionSummary {
        ElectionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            is_admin: self.is_admin(&user.user_id),
        }
    }
}

/// The admin-updatable subset of an election. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub eligible_voter_emails: Option<Vec<String>>,
    pub admin_user_ids: Option<Vec<String>>,
}

/// What a signed-in user sees in their election list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSummary {
    pub id: ElectionId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub is_admin: bool,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Election {
        pub fn example() -> Self {
            Election::new(
                "Council Election".to_string(),
                "Annual council and executive election".to_string(),
                &AuthenticatedUser::example(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_is_seeded_into_both_membership_lists() {
        let creator = AuthenticatedUser::example();
        let election = Election::example();

        assert_eq!(election.created_by, creator.user_id);
        assert!(election.is_admin(&creator.user_id));
        assert!(election.is_eligible_voter(&creator.email));
    }

    #[test]
    fn membership_checks_are_exact_and_case_sensitive() {
        let election = Election::example();

        assert!(!election.is_eligible_voter("Alice@example.com"));
        assert!(!election.is_eligible_voter("alice@example.com "));
        assert!(!election.is_admin("google-oauth2|10000"));
    }

    #[test]
    fn apply_patches_only_the_updatable_fields() {
        let mut election = Election::example();
        let id = election.id.clone();
        let created_at = election.created_at;

        election.apply(ElectionPatch {
            name: Some("Renamed".to_string()),
            description: None,
            eligible_voter_emails: Some(vec!["bob@example.com".to_string()]),
            admin_user_ids: None,
        });

        assert_eq!(election.name, "Renamed");
        assert_eq!(election.description, "Annual council and executive election");
        assert_eq!(election.eligible_voter_emails, vec!["bob@example.com"]);
        assert_eq!(election.id, id);
        assert_eq!(election.created_at, created_at);
    }

    #[test]
    fn summaries_report_the_caller_role() {
        let election = Election::example();

        assert!(election.summarise(&AuthenticatedUser::example()).is_admin);
        assert!(!election.summarise(&AuthenticatedUser::example2()).is_admin);
    }
}
