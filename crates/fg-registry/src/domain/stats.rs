//! # Incremental Statistics
//!
//! Running counters maintained as side effects of accepted transitions.
//! Nothing here ever recomputes by scanning report records; the service
//! applies exactly one increment/decrement per accepted mutation, which keeps
//! every query O(1) and keeps the counters honest under the append-only audit
//! trail.

use crate::domain::value_objects::{AccountId, LocationCode, ReportStatus, UnixTimestamp};
use fg_confidential::Ciphertext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// TOTAL STATS
// =============================================================================

/// Global counters by status bucket.
///
/// The five buckets always sum to `total`; `total` is never decremented.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalStats {
    /// Reports ever created.
    pub total: u64,
    /// Reports currently in `Submitted`.
    pub submitted: u64,
    /// Reports currently in `UnderReview`.
    pub under_review: u64,
    /// Reports currently in `Investigating`.
    pub investigating: u64,
    /// Reports currently in `Resolved`.
    pub resolved: u64,
    /// Reports currently in `Closed`.
    pub closed: u64,
}

impl TotalStats {
    /// Sum of the status buckets. Equals `total` whenever the ledger is
    /// consistent.
    #[must_use]
    pub fn bucket_sum(&self) -> u64 {
        self.submitted + self.under_review + self.investigating + self.resolved + self.closed
    }

    fn bucket_mut(&mut self, status: ReportStatus) -> &mut u64 {
        match status {
            ReportStatus::Submitted => &mut self.submitted,
            ReportStatus::UnderReview => &mut self.under_review,
            ReportStatus::Investigating => &mut self.investigating,
            ReportStatus::Resolved => &mut self.resolved,
            ReportStatus::Closed => &mut self.closed,
        }
    }
}

// =============================================================================
// LOCATION STATS
// =============================================================================

/// Per-location running counters.
///
/// The severity sum is kept as a vault ciphertext and accumulated
/// homomorphically; the stored record never sees a plaintext level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationStats {
    /// Reports submitted for this location.
    pub total_reports: u64,
    /// Reports for this location that reached `Resolved`.
    pub resolved_reports: u64,
    /// Homomorphic running sum of submitted severity levels.
    pub sealed_level_sum: Ciphertext,
    /// Time of the most recent submission for this location.
    pub last_report_time: UnixTimestamp,
}

/// Plaintext view of one location's counters.
///
/// `average_safety_level` is integer `sum / total`, revealed through the
/// aggregator's standing authority; `None` when the vault refuses or the
/// location was never seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationStatsView {
    /// Reports submitted for this location.
    pub total_reports: u64,
    /// Reports for this location that reached `Resolved`.
    pub resolved_reports: u64,
    /// Integer average of submitted severity levels.
    pub average_safety_level: Option<u64>,
    /// Time of the most recent submission.
    pub last_report_time: UnixTimestamp,
}

// =============================================================================
// STATS LEDGER
// =============================================================================

/// All aggregate state: global buckets, per-location and per-reporter
/// counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsLedger {
    totals: TotalStats,
    locations: HashMap<LocationCode, LocationStats>,
    reporters: HashMap<AccountId, u64>,
}

impl StatsLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted submission.
    ///
    /// `sealed_level_sum` is the already-accumulated ciphertext for the
    /// location (previous sum plus the new report's sealed level); the ledger
    /// stores it verbatim and never touches plaintext.
    pub fn on_report_submitted(
        &mut self,
        submitter: AccountId,
        location: LocationCode,
        now: UnixTimestamp,
        sealed_level_sum: Ciphertext,
    ) {
        self.totals.total += 1;
        self.totals.submitted += 1;

        match self.locations.get_mut(&location) {
            Some(entry) => {
                entry.total_reports += 1;
                entry.sealed_level_sum = sealed_level_sum;
                entry.last_report_time = now;
            }
            None => {
                self.locations.insert(
                    location,
                    LocationStats {
                        total_reports: 1,
                        resolved_reports: 0,
                        sealed_level_sum,
                        last_report_time: now,
                    },
                );
            }
        }

        *self.reporters.entry(submitter).or_insert(0) += 1;
    }

    /// Moves one report between status buckets. A `from == to` move (the
    /// emergency path re-closing a closed report) is a net no-op.
    pub fn on_status_changed(&mut self, from: ReportStatus, to: ReportStatus) {
        *self.totals.bucket_mut(from) -= 1;
        *self.totals.bucket_mut(to) += 1;
    }

    /// Records that a report for `location` reached `Resolved`.
    pub fn on_location_resolved(&mut self, location: LocationCode) {
        if let Some(entry) = self.locations.get_mut(&location) {
            entry.resolved_reports += 1;
        }
    }

    /// Global counters snapshot.
    #[must_use]
    pub fn totals(&self) -> TotalStats {
        self.totals.clone()
    }

    /// Per-location record, if the location was ever seen.
    #[must_use]
    pub fn location(&self, location: LocationCode) -> Option<&LocationStats> {
        self.locations.get(&location)
    }

    /// Submission count for a reporter (0 if never submitted).
    #[must_use]
    pub fn reporter_count(&self, reporter: AccountId) -> u64 {
        self.reporters.get(&reporter).copied().unwrap_or(0)
    }

    /// Sum of all per-reporter counts. Equals `totals().total` whenever the
    /// ledger is consistent.
    #[must_use]
    pub fn reporter_sum(&self) -> u64 {
        self.reporters.values().sum()
    }

    /// Sum of all per-location totals. Equals `totals().total` whenever the
    /// ledger is consistent.
    #[must_use]
    pub fn location_sum(&self) -> u64 {
        self.locations.values().map(|entry| entry.total_reports).sum()
    }
}

// =============================================================================
// TESTS
// =============================================================================
