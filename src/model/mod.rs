//! Stored document types and their outward projections.

pub use auth::{AuthenticatedUser, SessionInfo, SessionStore};
pub use ballot::{Ballot, BallotLog, COUNCIL_SEATS, EXECUTIVE_SEATS};
pub use candidate::{Candidate, NewCandidate, PrivateProfile, PublicCandidate};
pub use election::{Election, ElectionPatch, ElectionSummary};
pub use export::VotesExport;
pub use id::{BallotId, CandidateId, ElectionId};
pub use results::{CandidateTally, ElectionResults};
pub use status::{ElectionStatus, Openness};

pub mod auth;
pub mod ballot;
pub mod candidate;
pub mod election;
pub mod export;
pub mod id;
pub mod results;
pub mod status;
