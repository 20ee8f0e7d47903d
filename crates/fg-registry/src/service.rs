//! # Registry Service
//!
//! The public operations of the food-safety registry, wired over the
//! outbound ports. One service instance owns the whole store; mutating
//! operations take `&mut self`, so writers are serialized structurally and
//! the core carries no locks.
//!
//! ## Atomicity
//!
//! Every operation validates all of its failure conditions before its first
//! state change. A rejected call returns with the store, the statistics, and
//! the audit log exactly as they were. `batch_update_status` validates the
//! entire batch (including duplicate ids, which would make a second
//! application illegal) before applying anything.
//!
//! ## Notifications
//!
//! Audit records are appended only after all state changes of an operation
//! have been applied, one record per affected report, so the log never
//! mentions a mutation that did not happen.

use crate::adapters::audit_log::InMemoryAuditLog;
use crate::adapters::clock::ManualClock;
use crate::domain::entities::{Investigation, InvestigationInfo, Report, ReportInfo};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::stats::{LocationStatsView, TotalStats};
use crate::domain::value_objects::{
    AccountId, FoodTypeCode, LocationCode, ReportId, ReportStatus, SafetyLevel,
};
use crate::domain::RegistryStore;
use crate::errors::{AuthorizationError, RegistryError, StateError, ValidationError};
use crate::events::RegistryEvent;
use crate::ports::inbound::FoodSafetyApi;
use crate::ports::outbound::{Clock, ConfidentialVault, EventSink};
use fg_confidential::{RevealAuthority, TransparentVault};
use std::collections::HashMap;
use tracing::{debug, info, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Registry service configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Byte limit for report descriptions.
    pub max_description_bytes: usize,
    /// Byte limit for investigation findings.
    pub max_findings_bytes: usize,
    /// Cap on `batch_update_status` batch length.
    pub max_batch_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_description_bytes: 1024,
            max_findings_bytes: 2048,
            max_batch_len: 64,
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// The food-safety registry service.
///
/// Generic over the three injected capabilities:
/// - `V` - confidential value vault
/// - `E` - audit event sink
/// - `C` - time source
pub struct RegistryService<V: ConfidentialVault, E: EventSink, C: Clock> {
    config: RegistryConfig,
    store: RegistryStore,
    vault: V,
    audit: E,
    clock: C,
    /// Standing authority for aggregate reveals, minted at construction.
    /// Used for statistics sums and privileged level queries only.
    stats_authority: RevealAuthority,
}

impl<V: ConfidentialVault, E: EventSink, C: Clock> RegistryService<V, E, C> {
    /// Creates a registry. The creator becomes owner and initial regulator.
    pub fn new(owner: AccountId, config: RegistryConfig, mut vault: V, audit: E, clock: C) -> Self {
        let stats_authority = vault.mint_authority();
        info!(owner = %owner, "registry created");
        Self {
            config,
            store: RegistryStore::new(owner),
            vault,
            audit,
            clock,
            stats_authority,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The audit sink, for chain inspection.
    #[must_use]
    pub fn audit_log(&self) -> &E {
        &self.audit
    }

    /// Runs every domain invariant check against the current store.
    #[must_use]
    pub fn verify_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&self.store)
    }

    // =========================================================================
    // ROLE CHECKS
    // =========================================================================

    fn require_owner(&self, caller: AccountId) -> Result<(), RegistryError> {
        if self.store.access.is_owner(caller) {
            Ok(())
        } else {
            warn!(caller = %caller, "owner-only operation rejected");
            Err(AuthorizationError::NotOwner(caller).into())
        }
    }

    fn require_regulator(&self, caller: AccountId) -> Result<(), RegistryError> {
        if self.store.access.is_regulator(caller) {
            Ok(())
        } else {
            warn!(caller = %caller, "regulator-only operation rejected");
            Err(AuthorizationError::NotRegulator(caller).into())
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn check_text(
        len: usize,
        max: usize,
        make: impl FnOnce(usize, usize) -> ValidationError,
    ) -> Result<(), RegistryError> {
        if len > max {
            Err(make(len, max).into())
        } else {
            Ok(())
        }
    }

    /// Decodes a revealed severity back into the closed enum.
    fn decode_level(raw: u64) -> Result<SafetyLevel, RegistryError> {
        let byte = u8::try_from(raw).unwrap_or(u8::MAX);
        Ok(SafetyLevel::try_from(byte)?)
    }

    fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let result = check_all_invariants(&self.store);
            debug_assert!(
                result.is_ok(),
                "invariant violations after accepted operation: {:?}",
                result.violations
            );
        }
    }
}

// =============================================================================
// PUBLIC OPERATIONS
// =============================================================================

impl<V: ConfidentialVault, E: EventSink, C: Clock> FoodSafetyApi for RegistryService<V, E, C> {
    fn submit_report(
        &mut self,
        caller: AccountId,
        safety_level: u8,
        location_code: LocationCode,
        food_type_code: FoodTypeCode,
        description: &str,
    ) -> Result<ReportId, RegistryError> {
        let level = SafetyLevel::try_from(safety_level)?;
        Self::check_text(
            description.len(),
            self.config.max_description_bytes,
            |len, max| ValidationError::DescriptionTooLong { len, max },
        )?;

        let now = self.clock.now();
        let sealed = self.vault.seal(u64::from(level.as_u8()))?;
        let location_sum = match self.store.stats.location(location_code) {
            Some(entry) => self.vault.add(&entry.sealed_level_sum, &sealed)?,
            None => sealed.clone(),
        };

        let id = self.store.next_id;
        self.store.reports.insert(
            id,
            Report::submitted(
                id,
                caller,
                sealed,
                location_code,
                food_type_code,
                description.to_string(),
                now,
            ),
        );
        self.store.next_id += 1;
        self.store
            .location_index
            .entry(location_code)
            .or_default()
            .push(id);
        self.store
            .stats
            .on_report_submitted(caller, location_code, now, location_sum);
        self.audit.append(
            now,
            RegistryEvent::ReportSubmitted {
                id,
                submitter: caller,
                timestamp: now,
            },
            None,
        );

        info!(report_id = id, submitter = %caller, location = location_code, "report submitted");
        self.debug_check_invariants();
        Ok(id)
    }

    fn update_status(
        &mut self,
        caller: AccountId,
        id: ReportId,
        new_status: ReportStatus,
    ) -> Result<(), RegistryError> {
        self.require_regulator(caller)?;
        let now = self.clock.now();

        let report = self
            .store
            .reports
            .get_mut(&id)
            .ok_or(ValidationError::UnknownReport(id))?;
        let from = report.status;
        if !from.can_advance_to(new_status) {
            return Err(StateError::IllegalTransition {
                id,
                from,
                to: new_status,
            }
            .into());
        }

        report.advance(new_status, now);
        let location = report.location_code;
        self.store.stats.on_status_changed(from, new_status);
        if new_status == ReportStatus::Resolved {
            self.store.stats.on_location_resolved(location);
        }
        self.audit.append(
            now,
            RegistryEvent::ReportStatusChanged {
                id,
                status: new_status,
            },
            None,
        );

        info!(report_id = id, from = %from, to = %new_status, "status updated");
        self.debug_check_invariants();
        Ok(())
    }

    fn batch_update_status(
        &mut self,
        caller: AccountId,
        ids: &[ReportId],
        new_status: ReportStatus,
    ) -> Result<(), RegistryError> {
        self.require_regulator(caller)?;
        if ids.is_empty() {
            debug!("empty batch accepted as no-op");
            return Ok(());
        }
        if ids.len() > self.config.max_batch_len {
            return Err(ValidationError::BatchTooLarge {
                len: ids.len(),
                max: self.config.max_batch_len,
            }
            .into());
        }

        // Validate the whole batch against an overlay of planned statuses, so
        // a duplicated id is judged from the status it would already have.
        let mut planned: HashMap<ReportId, ReportStatus> = HashMap::new();
        for &id in ids {
            let current = match planned.get(&id) {
                Some(status) => *status,
                None => {
                    self.store
                        .reports
                        .get(&id)
                        .ok_or(ValidationError::UnknownReport(id))?
                        .status
                }
            };
            if !current.can_advance_to(new_status) {
                return Err(StateError::IllegalTransition {
                    id,
                    from: current,
                    to: new_status,
                }
                .into());
            }
            planned.insert(id, new_status);
        }

        let now = self.clock.now();
        for &id in ids {
            let Some(report) = self.store.reports.get_mut(&id) else {
                // Every id was validated above.
                continue;
            };
            let from = report.status;
            report.advance(new_status, now);
            let location = report.location_code;
            self.store.stats.on_status_changed(from, new_status);
            if new_status == ReportStatus::Resolved {
                self.store.stats.on_location_resolved(location);
            }
            self.audit.append(
                now,
                RegistryEvent::ReportStatusChanged {
                    id,
                    status: new_status,
                },
                None,
            );
        }

        info!(batch = ids.len(), to = %new_status, "batch status update applied");
        self.debug_check_invariants();
        Ok(())
    }

    fn emergency_close(
        &mut self,
        caller: AccountId,
        id: ReportId,
        reason: &str,
    ) -> Result<(), RegistryError> {
        self.require_owner(caller)?;
        let now = self.clock.now();

        let report = self
            .store
            .reports
            .get_mut(&id)
            .ok_or(ValidationError::UnknownReport(id))?;
        let from = report.status;
        report.force_close(now);
        self.store
            .stats
            .on_status_changed(from, ReportStatus::Closed);
        self.audit.append(
            now,
            RegistryEvent::ReportStatusChanged {
                id,
                status: ReportStatus::Closed,
            },
            Some(reason.to_string()),
        );

        warn!(report_id = id, from = %from, reason, "report emergency-closed");
        self.debug_check_invariants();
        Ok(())
    }

    fn start_investigation(
        &mut self,
        caller: AccountId,
        id: ReportId,
    ) -> Result<(), RegistryError> {
        if !self.store.access.is_authorized_investigator(caller)
            && !self.store.access.is_regulator(caller)
        {
            warn!(caller = %caller, report_id = id, "investigation start rejected");
            return Err(AuthorizationError::NotInvestigator(caller).into());
        }
        let now = self.clock.now();

        let report = self
            .store
            .reports
            .get_mut(&id)
            .ok_or(ValidationError::UnknownReport(id))?;
        let from = report.status;
        match from {
            ReportStatus::Investigating | ReportStatus::Resolved | ReportStatus::Closed => {
                return Err(StateError::NotInvestigable { id, status: from }.into());
            }
            ReportStatus::Submitted | ReportStatus::UnderReview => {}
        }

        report.advance(ReportStatus::Investigating, now);
        debug_assert!(
            !self.store.investigations.contains_key(&id),
            "a report below Investigating cannot already carry an investigation"
        );
        self.store
            .investigations
            .insert(id, Investigation::started(id, caller, now));
        self.store
            .stats
            .on_status_changed(from, ReportStatus::Investigating);
        self.audit.append(
            now,
            RegistryEvent::InvestigationStarted {
                id,
                investigator: caller,
            },
            None,
        );

        info!(report_id = id, investigator = %caller, "investigation started");
        self.debug_check_invariants();
        Ok(())
    }

    fn complete_investigation(
        &mut self,
        caller: AccountId,
        id: ReportId,
        final_safety_level: u8,
        findings: &str,
    ) -> Result<(), RegistryError> {
        let investigation = self
            .store
            .investigations
            .get(&id)
            .ok_or(ValidationError::NoInvestigation(id))?;
        if caller != investigation.investigator && !self.store.access.is_regulator(caller) {
            warn!(caller = %caller, report_id = id, "investigation completion rejected");
            return Err(AuthorizationError::NotAssignedInvestigator(caller).into());
        }
        if investigation.is_complete {
            return Err(StateError::InvestigationAlreadyComplete(id).into());
        }
        let level = SafetyLevel::try_from(final_safety_level)?;
        Self::check_text(findings.len(), self.config.max_findings_bytes, |len, max| {
            ValidationError::FindingsTooLong { len, max }
        })?;
        let Some(report_status) = self.store.reports.get(&id).map(|report| report.status) else {
            return Err(ValidationError::UnknownReport(id).into());
        };
        if report_status == ReportStatus::Closed {
            // Emergency close outranks the investigation.
            return Err(StateError::ReportClosed(id).into());
        }
        let now = self.clock.now();

        let Some(investigation) = self.store.investigations.get_mut(&id) else {
            return Err(ValidationError::NoInvestigation(id).into());
        };
        investigation.conclude(level, findings.to_string(), now);
        let Some(report) = self.store.reports.get_mut(&id) else {
            return Err(ValidationError::UnknownReport(id).into());
        };
        let from = report.status;
        report.advance(ReportStatus::Resolved, now);
        report.is_processed = true;
        let location = report.location_code;
        self.store
            .stats
            .on_status_changed(from, ReportStatus::Resolved);
        self.store.stats.on_location_resolved(location);
        self.audit.append(
            now,
            RegistryEvent::InvestigationCompleted {
                id,
                final_level: level,
            },
            None,
        );

        info!(report_id = id, final_level = %level, "investigation completed");
        self.debug_check_invariants();
        Ok(())
    }

    fn set_regulator(&mut self, caller: AccountId, next: AccountId) -> Result<(), RegistryError> {
        self.require_owner(caller)?;
        let previous = self.store.access.regulator();
        if self.store.access.set_regulator(next) {
            let now = self.clock.now();
            self.audit.append(
                now,
                RegistryEvent::RegulatorChanged {
                    previous,
                    current: next,
                },
                None,
            );
            info!(previous = %previous, current = %next, "regulator replaced");
        }
        Ok(())
    }

    fn authorize_investigator(
        &mut self,
        caller: AccountId,
        investigator: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_regulator(caller)?;
        if self.store.access.authorize_investigator(investigator) {
            let now = self.clock.now();
            self.audit.append(
                now,
                RegistryEvent::InvestigatorAuthorized { investigator },
                None,
            );
            info!(investigator = %investigator, "investigator authorized");
        }
        Ok(())
    }

    fn revoke_investigator(
        &mut self,
        caller: AccountId,
        investigator: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_regulator(caller)?;
        if self.store.access.revoke_investigator(investigator) {
            let now = self.clock.now();
            self.audit
                .append(now, RegistryEvent::InvestigatorRevoked { investigator }, None);
            info!(investigator = %investigator, "investigator revoked");
        }
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    fn get_report_info(&self, id: ReportId) -> ReportInfo {
        match self.store.reports.get(&id) {
            Some(report) => {
                let level = if self.vault.is_sealing() {
                    None
                } else {
                    self.vault
                        .reveal(&report.sealed_level, &self.stats_authority)
                        .ok()
                        .and_then(|raw| Self::decode_level(raw).ok())
                };
                ReportInfo::from_report(report, level)
            }
            None => ReportInfo::missing(id),
        }
    }

    fn get_investigation_info(&self, id: ReportId) -> InvestigationInfo {
        self.store
            .investigations
            .get(&id)
            .map_or_else(|| InvestigationInfo::missing(id), InvestigationInfo::from)
    }

    fn get_total_stats(&self) -> TotalStats {
        self.store.stats.totals()
    }

    fn get_location_stats(&self, location: LocationCode) -> LocationStatsView {
        match self.store.stats.location(location) {
            Some(entry) => {
                let average = self
                    .vault
                    .reveal(&entry.sealed_level_sum, &self.stats_authority)
                    .ok()
                    .map(|sum| sum / entry.total_reports);
                LocationStatsView {
                    total_reports: entry.total_reports,
                    resolved_reports: entry.resolved_reports,
                    average_safety_level: average,
                    last_report_time: entry.last_report_time,
                }
            }
            None => LocationStatsView::default(),
        }
    }

    fn get_reporter_stats(&self, reporter: AccountId) -> u64 {
        self.store.stats.reporter_count(reporter)
    }

    fn is_authorized_investigator(&self, identity: AccountId) -> bool {
        self.store.access.is_authorized_investigator(identity)
    }

    fn is_regulator(&self, identity: AccountId) -> bool {
        self.store.access.is_regulator(identity)
    }

    fn is_owner(&self, identity: AccountId) -> bool {
        self.store.access.is_owner(identity)
    }

    fn report_count(&self) -> u64 {
        self.store.report_count()
    }

    fn get_reports_by_location(&self, location: LocationCode) -> &[ReportId] {
        self.store
            .location_index
            .get(&location)
            .map_or(&[], Vec::as_slice)
    }

    fn reveal_safety_level(
        &self,
        caller: AccountId,
        id: ReportId,
    ) -> Result<SafetyLevel, RegistryError> {
        if !self.store.access.is_owner(caller) && !self.store.access.is_regulator(caller) {
            return Err(AuthorizationError::NotPrivileged(caller).into());
        }
        let report = self
            .store
            .reports
            .get(&id)
            .ok_or(ValidationError::UnknownReport(id))?;
        let raw = self.vault.reveal(&report.sealed_level, &self.stats_authority)?;
        Self::decode_level(raw)
    }
}

// =============================================================================
// TEST CONSTRUCTOR
// =============================================================================

/// Registry wired with a transparent vault, an in-memory audit log, and a
/// hand-driven clock.
#[must_use]
pub fn create_test_service(
    owner: AccountId,
) -> RegistryService<TransparentVault, InMemoryAuditLog, ManualClock> {
    RegistryService::new(
        owner,
        RegistryConfig::default(),
        TransparentVault::new(),
        InMemoryAuditLog::new(),
        ManualClock::default(),
    )
}

// =============================================================================
// TESTS
// =============================================================================
