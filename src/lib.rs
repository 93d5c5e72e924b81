//! Core engine for running multi-seat council elections: an election
//! registry, per-election candidate rosters, a scheduled/manual status
//! machine, one-ballot-per-voter submission, and deterministic tabulation,
//! all persisted through a whole-document JSON store.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

pub use config::Config;
pub use engine::ElectionEngine;
pub use error::{Conflict, Error, Result};
