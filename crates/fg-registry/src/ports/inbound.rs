//! # Driving Port (Inbound)
//!
//! The registry's public operation surface, consumed by the transaction
//! dispatch layer. Every mutating operation takes the authenticated caller
//! handle as its first argument; the registry trusts that handle and nothing
//! inside the payload (envelope-only identity).
//!
//! Mutating operations require `&mut self`: the environment serializes
//! writers, and the borrow rules make that serialization structural. There
//! are no locks anywhere in the core.

use crate::domain::entities::{InvestigationInfo, ReportInfo};
use crate::domain::stats::{LocationStatsView, TotalStats};
use crate::domain::value_objects::{
    AccountId, FoodTypeCode, LocationCode, ReportId, ReportStatus, SafetyLevel,
};
use crate::errors::RegistryError;

/// Public operations of the food-safety registry.
///
/// Every mutating operation either applies all of its state changes or none:
/// each implementation validates every failure condition before its first
/// mutation.
pub trait FoodSafetyApi {
    // =========================================================================
    // REPORT SUBMISSION AND LIFECYCLE
    // =========================================================================

    /// Submit a new report. Open to any caller.
    ///
    /// `safety_level` arrives as a raw wire byte and is rejected with a
    /// validation error when above 4. Returns the assigned id.
    fn submit_report(
        &mut self,
        caller: AccountId,
        safety_level: u8,
        location_code: LocationCode,
        food_type_code: FoodTypeCode,
        description: &str,
    ) -> Result<ReportId, RegistryError>;

    /// Manually move a report forward along the lifecycle. Regulator only.
    ///
    /// Enforces the forward-only graph; `Closed` is unreachable here.
    fn update_status(
        &mut self,
        caller: AccountId,
        id: ReportId,
        new_status: ReportStatus,
    ) -> Result<(), RegistryError>;

    /// Apply [`FoodSafetyApi::update_status`] semantics to every id as one
    /// atomic unit. Regulator only.
    ///
    /// The whole batch is validated first; any invalid id or illegal
    /// transition rejects the batch with nothing applied. An empty batch
    /// succeeds as a no-op.
    fn batch_update_status(
        &mut self,
        caller: AccountId,
        ids: &[ReportId],
        new_status: ReportStatus,
    ) -> Result<(), RegistryError>;

    /// Force a report to `Closed` and invalidate it, from any state, even if
    /// already closed. Owner only. The reason lands in the audit trail.
    fn emergency_close(
        &mut self,
        caller: AccountId,
        id: ReportId,
        reason: &str,
    ) -> Result<(), RegistryError>;

    // =========================================================================
    // INVESTIGATIONS
    // =========================================================================

    /// Open an investigation and force the report to `Investigating`.
    /// Authorized investigator or regulator.
    fn start_investigation(&mut self, caller: AccountId, id: ReportId)
        -> Result<(), RegistryError>;

    /// Conclude an investigation: record findings and final severity, force
    /// the report to `Resolved`, mark it processed. Assigned investigator or
    /// regulator.
    fn complete_investigation(
        &mut self,
        caller: AccountId,
        id: ReportId,
        final_safety_level: u8,
        findings: &str,
    ) -> Result<(), RegistryError>;

    // =========================================================================
    // ACCESS CONTROL
    // =========================================================================

    /// Replace the regulator. Owner only; no-op-safe when the identity is
    /// unchanged.
    fn set_regulator(&mut self, caller: AccountId, next: AccountId) -> Result<(), RegistryError>;

    /// Grant investigator membership. Regulator only; idempotent.
    fn authorize_investigator(
        &mut self,
        caller: AccountId,
        investigator: AccountId,
    ) -> Result<(), RegistryError>;

    /// Withdraw investigator membership. Regulator only; idempotent.
    fn revoke_investigator(
        &mut self,
        caller: AccountId,
        investigator: AccountId,
    ) -> Result<(), RegistryError>;

    // =========================================================================
    // READ-ONLY QUERIES
    // =========================================================================

    /// Report snapshot; the empty-record sentinel for unknown ids.
    fn get_report_info(&self, id: ReportId) -> ReportInfo;

    /// Investigation snapshot; the empty sentinel when none exists.
    fn get_investigation_info(&self, id: ReportId) -> InvestigationInfo;

    /// Global status-bucket counters.
    fn get_total_stats(&self) -> TotalStats;

    /// Per-location counters; all-zero defaults for unseen codes.
    fn get_location_stats(&self, location: LocationCode) -> LocationStatsView;

    /// Submission count for an identity; 0 if it never submitted.
    fn get_reporter_stats(&self, reporter: AccountId) -> u64;

    /// Whether an identity is in the authorized-investigator set.
    fn is_authorized_investigator(&self, identity: AccountId) -> bool;

    /// Whether an identity is the current regulator.
    fn is_regulator(&self, identity: AccountId) -> bool;

    /// Whether an identity is the owner.
    fn is_owner(&self, identity: AccountId) -> bool;

    /// Number of reports ever created.
    fn report_count(&self) -> u64;

    /// Ids of every report submitted for a location, in submission order.
    /// Served from the location index, never by scanning records.
    fn get_reports_by_location(&self, location: LocationCode) -> &[ReportId];

    /// Reveal a report's sealed severity. Owner or regulator only.
    fn reveal_safety_level(
        &self,
        caller: AccountId,
        id: ReportId,
    ) -> Result<SafetyLevel, RegistryError>;
}
