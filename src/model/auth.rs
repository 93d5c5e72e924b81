use serde::{Deserialize, Serialize};

/// The verified identity triple supplied by the external identity provider
/// for an authenticated session. The engine trusts these values verbatim;
/// verifying them is the provider's job, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Stable user id from the identity provider.
    pub user_id: String,
    /// Verified email address, matched against eligible-voter lists.
    pub email: String,
    /// Display name, denormalised into cast ballots for audit and export.
    pub display_name: String,
}

/// A session as held by the external session store: the identity triple
/// plus transient flags the frontend uses to shape its UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user: AuthenticatedUser,
    pub has_voted: bool,
    pub is_admin: bool,
    pub is_eligible_voter: bool,
}

/// Interface to the external session store. The engine does not own session
/// lifecycle; it only consumes the identity triple out of a resolved
/// session.
pub trait SessionStore: Send + Sync {
    /// Resolve an opaque session token. `None` means not signed in.
    fn session(&self, token: &str) -> Option<SessionInfo>;

    /// Drop a session, e.g. on logout.
    fn delete_session(&self, token: &str);
}
