//! # Domain Invariants
//!
//! Structural invariants that MUST hold after every accepted operation.
//! The service checks them in debug builds after each mutation; the checks
//! are also exercised directly by tests as the ground truth for ledger
//! consistency.

use crate::domain::value_objects::{ReportId, ReportStatus};
use crate::domain::RegistryStore;
use thiserror::Error;

// =============================================================================
// VIOLATIONS
// =============================================================================

/// A broken invariant, with enough context to locate the damage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Status buckets no longer sum to the total.
    #[error("bucket sum {bucket_sum} != total {total}")]
    BucketSumMismatch {
        /// Sum across the five buckets.
        bucket_sum: u64,
        /// Recorded total.
        total: u64,
    },

    /// Report ids are not dense in `1..next_id`.
    #[error("report ids are not dense: expected {expected} records, found {found}")]
    SparseIds {
        /// `next_id - 1`.
        expected: u64,
        /// Actual record count.
        found: u64,
    },

    /// Total does not match the number of records ever created.
    #[error("total {total} != report count {count}")]
    TotalMismatch {
        /// Recorded total.
        total: u64,
        /// `next_id - 1`.
        count: u64,
    },

    /// An investigation references a report that does not exist.
    #[error("investigation for report {0} has no report record")]
    OrphanInvestigation(ReportId),

    /// An investigation exists but its report never reached `Investigating`.
    #[error("report {id} is {status} but carries an investigation")]
    PrematureInvestigation {
        /// Report in question.
        id: ReportId,
        /// Its current status.
        status: ReportStatus,
    },

    /// Per-reporter counts no longer sum to the total.
    #[error("reporter counts sum to {sum}, total is {total}")]
    ReporterSumMismatch {
        /// Sum across reporters.
        sum: u64,
        /// Recorded total.
        total: u64,
    },

    /// Per-location totals no longer sum to the total.
    #[error("location totals sum to {sum}, total is {total}")]
    LocationSumMismatch {
        /// Sum across locations.
        sum: u64,
        /// Recorded total.
        total: u64,
    },

    /// The location index disagrees with the location counters.
    #[error("location {location} indexes {indexed} reports, counter says {counted}")]
    LocationIndexMismatch {
        /// Location code.
        location: u32,
        /// Ids in the index.
        indexed: u64,
        /// Counter value.
        counted: u64,
    },
}

/// Result of running every invariant check.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvariantCheckResult {
    /// All violations found, empty when the store is consistent.
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// True when no invariant is broken.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

// =============================================================================
// CHECKS
// =============================================================================

/// Status buckets sum to the total.
#[must_use]
pub fn check_bucket_sum_invariant(store: &RegistryStore) -> Option<InvariantViolation> {
    let totals = store.stats.totals();
    let bucket_sum = totals.bucket_sum();
    if bucket_sum == totals.total {
        None
    } else {
        Some(InvariantViolation::BucketSumMismatch {
            bucket_sum,
            total: totals.total,
        })
    }
}

/// Ids are dense: every id in `1..next_id` has a record, and the total equals
/// the count of records ever created.
#[must_use]
pub fn check_dense_ids_invariant(store: &RegistryStore) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let expected = store.report_count();
    let found = store.reports.len() as u64;
    if expected != found || store.reports.keys().next_back().copied().unwrap_or(0) != expected {
        violations.push(InvariantViolation::SparseIds { expected, found });
    }
    let total = store.stats.totals().total;
    if total != expected {
        violations.push(InvariantViolation::TotalMismatch {
            total,
            count: expected,
        });
    }
    violations
}

/// Every investigation belongs to an existing report whose status shows the
/// investigation actually started.
#[must_use]
pub fn check_investigation_linkage_invariant(store: &RegistryStore) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for (id, investigation) in &store.investigations {
        match store.reports.get(id) {
            None => violations.push(InvariantViolation::OrphanInvestigation(*id)),
            Some(report) => {
                // A report with an investigation has reached Investigating at
                // least once, so its status can only be Investigating or a
                // terminal state; an open investigation additionally rules
                // out Resolved.
                let legal = match report.status {
                    ReportStatus::Investigating | ReportStatus::Closed => true,
                    ReportStatus::Resolved => investigation.is_complete,
                    ReportStatus::Submitted | ReportStatus::UnderReview => false,
                };
                if !legal {
                    violations.push(InvariantViolation::PrematureInvestigation {
                        id: *id,
                        status: report.status,
                    });
                }
            }
        }
    }
    violations
}

/// Per-reporter and per-location counters sum to the total.
#[must_use]
pub fn check_aggregate_sum_invariant(store: &RegistryStore) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let total = store.stats.totals().total;
    let reporter_sum = store.stats.reporter_sum();
    if reporter_sum != total {
        violations.push(InvariantViolation::ReporterSumMismatch {
            sum: reporter_sum,
            total,
        });
    }
    let location_sum = store.stats.location_sum();
    if location_sum != total {
        violations.push(InvariantViolation::LocationSumMismatch {
            sum: location_sum,
            total,
        });
    }
    for (location, ids) in &store.location_index {
        let counted = store
            .stats
            .location(*location)
            .map_or(0, |entry| entry.total_reports);
        if ids.len() as u64 != counted {
            violations.push(InvariantViolation::LocationIndexMismatch {
                location: *location,
                indexed: ids.len() as u64,
                counted,
            });
        }
    }
    violations
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(store: &RegistryStore) -> InvariantCheckResult {
    let mut result = InvariantCheckResult::default();
    if let Some(violation) = check_bucket_sum_invariant(store) {
        result.violations.push(violation);
    }
    result.violations.extend(check_dense_ids_invariant(store));
    result
        .violations
        .extend(check_investigation_linkage_invariant(store));
    result.violations.extend(check_aggregate_sum_invariant(store));
    result
}

// =============================================================================
// TESTS
// =============================================================================
