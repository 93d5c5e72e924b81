use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(#[from] Conflict),
    #[error("Election is currently closed")]
    ElectionClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Business-rule violations: attempts that are well-formed but collide with
/// recorded state or a locked slate. Each variant names the rule that
/// rejected the request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("you have already voted in this election")]
    AlreadyVoted,
    #[error("a ballot must select exactly 15 council candidates and 7 executive candidates")]
    WrongSelectionCount,
    #[error("duplicate selections are not allowed")]
    DuplicateSelection,
    #[error("all executive candidates must also be selected as council members")]
    ExecutiveNotInCouncil,
    #[error("the candidate roster cannot change while the election is open")]
    RosterLocked,
}
