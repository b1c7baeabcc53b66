//! Crawl lifecycle states
//!
//! A crawl starts `Idle`, becomes `Running` once its output directory
//! exists, moves to `Draining` while the archive is built and ends `Done`.
//! `Failed` is reachable from every non-terminal state.

use crate::HarvestError;
use std::fmt;

/// Represents the current state of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Job created, nothing written yet
    Idle,

    /// Crawl loop is fetching pages
    Running,

    /// Crawl loop finished, archive being built
    Draining,

    /// Archive produced
    Done,

    /// Setup or archiving failed; no archive is reported
    Failed,
}

impl CrawlState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the transition `self -> next` is allowed
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
                | (Self::Idle | Self::Running | Self::Draining, Self::Failed)
        )
    }

    /// Performs a checked transition
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlState)` - The new state
    /// * `Err(HarvestError::InvalidTransition)` - The transition is not allowed
    pub fn transition(self, next: CrawlState) -> Result<CrawlState, HarvestError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(HarvestError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
