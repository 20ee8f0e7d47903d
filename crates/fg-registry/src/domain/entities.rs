//! # Core Domain Entities
//!
//! Report and investigation records, plus the read-only views the query
//! surface returns. Records are mutated only through the methods here, all of
//! which preserve the forward-only lifecycle.

use crate::domain::value_objects::{
    AccountId, FoodTypeCode, LocationCode, ReportId, ReportStatus, SafetyLevel, UnixTimestamp,
};
use fg_confidential::Ciphertext;
use serde::{Deserialize, Serialize};

// =============================================================================
// REPORT
// =============================================================================

/// A single submitted food-safety concern record.
///
/// Created on submission, never deleted. The safety level is stored as a
/// vault ciphertext so the record itself carries no plaintext severity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    /// Dense identifier assigned from 1.
    pub id: ReportId,
    /// Opaque handle of the submitting caller.
    pub submitter: AccountId,
    /// Sealed severity (ordinal 0-4 under the vault).
    pub sealed_level: Ciphertext,
    /// 32-bit location code.
    pub location_code: LocationCode,
    /// 32-bit food-type code.
    pub food_type_code: FoodTypeCode,
    /// Free-form description. Bounded at the trust boundary; may be empty.
    pub description: String,
    /// Current lifecycle status.
    pub status: ReportStatus,
    /// Submission time.
    pub created_at: UnixTimestamp,
    /// Time of the last accepted mutation.
    pub last_updated: UnixTimestamp,
    /// Set once an investigation concluded.
    pub is_processed: bool,
    /// Cleared by the emergency path.
    pub is_valid: bool,
}

impl Report {
    /// Creates a freshly submitted report.
    #[must_use]
    pub fn submitted(
        id: ReportId,
        submitter: AccountId,
        sealed_level: Ciphertext,
        location_code: LocationCode,
        food_type_code: FoodTypeCode,
        description: String,
        now: UnixTimestamp,
    ) -> Self {
        Self {
            id,
            submitter,
            sealed_level,
            location_code,
            food_type_code,
            description,
            status: ReportStatus::Submitted,
            created_at: now,
            last_updated: now,
            is_processed: false,
            is_valid: true,
        }
    }

    /// Moves the report to `next` and stamps the update time.
    ///
    /// Callers have already validated the transition; this only records it.
    pub fn advance(&mut self, next: ReportStatus, now: UnixTimestamp) {
        self.status = next;
        self.last_updated = now;
    }

    /// Emergency path: force `Closed` and invalidate, from any state.
    pub fn force_close(&mut self, now: UnixTimestamp) {
        self.status = ReportStatus::Closed;
        self.is_valid = false;
        self.last_updated = now;
    }
}

// =============================================================================
// INVESTIGATION
// =============================================================================

/// The work record tracking one report's review, from start to completion.
///
/// Exactly one per report, created lazily when an investigation starts.
/// Mutated once on completion and immutable afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Investigation {
    /// The report under investigation.
    pub report_id: ReportId,
    /// The caller that started the investigation.
    pub investigator: AccountId,
    /// Start time.
    pub started_at: UnixTimestamp,
    /// Completion time; 0 while open.
    pub ended_at: UnixTimestamp,
    /// Whether the investigation has concluded.
    pub is_complete: bool,
    /// Final assessed severity, set on completion.
    pub final_safety_level: Option<SafetyLevel>,
    /// Findings text, set on completion. Bounded at the trust boundary.
    pub findings: String,
}

impl Investigation {
    /// Opens an investigation for a report.
    #[must_use]
    pub fn started(report_id: ReportId, investigator: AccountId, now: UnixTimestamp) -> Self {
        Self {
            report_id,
            investigator,
            started_at: now,
            ended_at: 0,
            is_complete: false,
            final_safety_level: None,
            findings: String::new(),
        }
    }

    /// Records the conclusion. The caller has already checked
    /// `is_complete == false`.
    pub fn conclude(&mut self, final_level: SafetyLevel, findings: String, now: UnixTimestamp) {
        self.is_complete = true;
        self.final_safety_level = Some(final_level);
        self.findings = findings;
        self.ended_at = now;
    }
}

// =============================================================================
// READ-ONLY VIEWS
// =============================================================================

/// Snapshot of a report returned by the query surface.
///
/// Unknown ids yield the empty-record sentinel instead of an error, so
/// callers can probe ids without distinguishing "never existed" from
/// "not visible".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInfo {
    /// Queried id.
    pub id: ReportId,
    /// Submitter handle; zero for the sentinel.
    pub submitter: AccountId,
    /// Plaintext severity when the vault is transparent, `None` when sealed
    /// or for the sentinel.
    pub safety_level: Option<SafetyLevel>,
    /// Location code; 0 for the sentinel.
    pub location_code: LocationCode,
    /// Food-type code; 0 for the sentinel.
    pub food_type_code: FoodTypeCode,
    /// Description text; empty for the sentinel.
    pub description: String,
    /// Lifecycle status; default for the sentinel.
    pub status: ReportStatus,
    /// Submission time; 0 for the sentinel.
    pub created_at: UnixTimestamp,
    /// Last mutation time; 0 for the sentinel.
    pub last_updated: UnixTimestamp,
    /// Processing flag; false for the sentinel.
    pub is_processed: bool,
    /// Validity flag; false for the sentinel.
    pub is_valid: bool,
}

impl ReportInfo {
    /// The empty-record sentinel for an id that was never assigned.
    #[must_use]
    pub fn missing(id: ReportId) -> Self {
        Self {
            id,
            submitter: AccountId::ZERO,
            safety_level: None,
            location_code: 0,
            food_type_code: 0,
            description: String::new(),
            status: ReportStatus::default(),
            created_at: 0,
            last_updated: 0,
            is_processed: false,
            is_valid: false,
        }
    }

    /// Builds a view over a stored report with an optional revealed level.
    #[must_use]
    pub fn from_report(report: &Report, safety_level: Option<SafetyLevel>) -> Self {
        Self {
            id: report.id,
            submitter: report.submitter,
            safety_level,
            location_code: report.location_code,
            food_type_code: report.food_type_code,
            description: report.description.clone(),
            status: report.status,
            created_at: report.created_at,
            last_updated: report.last_updated,
            is_processed: report.is_processed,
            is_valid: report.is_valid,
        }
    }
}

/// Snapshot of an investigation returned by the query surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigationInfo {
    /// Queried report id.
    pub report_id: ReportId,
    /// Assigned investigator; zero for the sentinel.
    pub investigator: AccountId,
    /// Start time; 0 for the sentinel.
    pub started_at: UnixTimestamp,
    /// Completion time; 0 while open or for the sentinel.
    pub ended_at: UnixTimestamp,
    /// Completion flag; false for the sentinel.
    pub is_complete: bool,
    /// Final severity once concluded.
    pub final_safety_level: Option<SafetyLevel>,
    /// Findings text; empty while open or for the sentinel.
    pub findings: String,
}

impl InvestigationInfo {
    /// The empty sentinel for a report with no investigation.
    #[must_use]
    pub fn missing(report_id: ReportId) -> Self {
        Self {
            report_id,
            investigator: AccountId::ZERO,
            started_at: 0,
            ended_at: 0,
            is_complete: false,
            final_safety_level: None,
            findings: String::new(),
        }
    }
}

impl From<&Investigation> for InvestigationInfo {
    fn from(investigation: &Investigation) -> Self {
        Self {
            report_id: investigation.report_id,
            investigator: investigation.investigator,
            started_at: investigation.started_at,
            ended_at: investigation.ended_at,
            is_complete: investigation.is_complete,
            final_safety_level: investigation.final_safety_level,
            findings: investigation.findings.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
