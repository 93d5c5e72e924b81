use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-election status record: a manual open flag plus an optional
/// scheduled voting window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionStatus {
    /// Manual open flag. Only consulted when no window is set.
    #[serde(default)]
    pub is_open: bool,
    /// Scheduled window start (inclusive).
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Scheduled window end (exclusive).
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

/// Where an election sits in its lifecycle at a given instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Openness {
    /// Not accepting votes: no window, manual flag off.
    Closed,
    /// A window is set and has not started yet.
    ScheduledPending,
    /// Votes are currently accepted.
    Open,
    /// A window is set and has already ended.
    ScheduledClosed,
}

impl ElectionStatus {
    /// The scheduled window, if both endpoints are set.
    pub fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start_time.zip(self.end_time)
    }

    /// Effective openness at `now`. A scheduled window takes precedence over
    /// the manual flag; within a window the election is open for
    /// `start <= now < end`.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        match self.window() {
            Some((start, end)) => start <= now && now < end,
            None => self.is_open,
        }
    }

    /// Lifecycle state at `now`. Recomputed from the wall clock on every
    /// query, never cached, so elapsed time is reflected without a separate
    /// scheduler process.
    pub fn openness(&self, now: DateTime<Utc>) -> Openness {
        match self.window() {
            Some((start, _)) if now < start => Openness::ScheduledPending,
            Some((_, end)) if now < end => Openness::Open,
            Some(_) => Openness::ScheduledClosed,
            None if self.is_open => Openness::Open,
            None => Openness::Closed,
        }
    }

    /// Flip the manual open flag and return its new value. Any scheduled
    /// window is left untouched and keeps precedence for openness queries.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Set the scheduled window, forcing the manual flag off. The window
    /// must be non-empty.
    pub fn schedule(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
        if start >= end {
            return Err(Error::InvalidInput(
                "Start time must be before end time".to_string(),
            ));
        }
        self.is_open = false;
        self.start_time = Some(start);
        self.end_time = Some(end);
        Ok(())
    }
}
