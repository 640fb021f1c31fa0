//! Dashboard view-model.
//!
//! All view state lives in one struct updated by discrete actions, and every
//! fetch carries a generation number: a completion whose generation has been
//! superseded is discarded, so a newer request always wins over an older one
//! regardless of completion order.

use crate::models::{DateRange, Report};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// State of the dashboard view.
#[derive(Debug, Default)]
pub struct DashboardState {
    report: Option<Report>,
    last_error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
    excluded: HashSet<String>,
    range: Option<DateRange>,
    generation: u64,
    in_flight: Option<u64>,
}

/// Discrete updates applied to the view state.
#[derive(Debug, Clone)]
pub enum Action {
    /// A fetch completed successfully.
    FetchSucceeded {
        generation: u64,
        report: Report,
        at: DateTime<Utc>,
    },
    /// A fetch failed. The previous report is retained.
    FetchFailed { generation: u64, message: String },
    /// The exclusion filter changed.
    ExclusionsApplied(HashSet<String>),
    /// The query window changed.
    RangeApplied(Option<DateRange>),
}

impl DashboardState {
    /// New state with an initial exclusion set.
    pub fn new(excluded: HashSet<String>) -> Self {
        Self {
            excluded,
            ..Self::default()
        }
    }

    /// Register a new fetch and return its generation. Any fetch started
    /// earlier is superseded from this point on.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.generation
    }

    /// Apply an action. Returns true when the view changed; stale fetch
    /// completions are dropped and return false.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::FetchSucceeded {
                generation,
                report,
                at,
            } => {
                if self.in_flight != Some(generation) {
                    debug!("Discarding superseded fetch result (generation {})", generation);
                    return false;
                }
                self.report = Some(report);
                self.last_error = None;
                self.last_updated = Some(at);
                self.in_flight = None;
                true
            }
            Action::FetchFailed {
                generation,
                message,
            } => {
                if self.in_flight != Some(generation) {
                    debug!("Discarding superseded fetch failure (generation {})", generation);
                    return false;
                }
                self.last_error = Some(message);
                self.in_flight = None;
                true
            }
            Action::ExclusionsApplied(excluded) => {
                self.excluded = excluded;
                true
            }
            Action::RangeApplied(range) => {
                self.range = range;
                true
            }
        }
    }

    /// The most recently fetched payload, if any.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Error message of the latest failed fetch, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Time of the last successful fetch.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Currently excluded workspace ids.
    pub fn excluded(&self) -> &HashSet<String> {
        &self.excluded
    }

    /// The window the latest fetch queried with.
    pub fn range(&self) -> Option<DateRange> {
        self.range
    }
}
