//! # Integration Test Flows
//!
//! Drives the registry the way the transaction dispatch layer does: a fixed
//! cast of callers (owner, regulator, investigator, reporters) exercising the
//! full report lifecycle, with the audit chain and the domain invariants
//! verified after every scenario.

#[cfg(test)]
mod tests {
    use fg_registry::prelude::*;
    use fg_registry::service::create_test_service;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const OWNER: AccountId = AccountId::new([0x0A; 20]);
    const REGULATOR: AccountId = AccountId::new([0x0B; 20]);
    const INVESTIGATOR: AccountId = AccountId::new([0x0C; 20]);
    const REPORTER: AccountId = AccountId::new([0x0D; 20]);

    /// Registry with the standard cast wired in.
    fn staffed_registry() -> RegistryService<
        fg_confidential::TransparentVault,
        InMemoryAuditLog,
        ManualClock,
    > {
        let mut registry = create_test_service(OWNER);
        registry.set_regulator(OWNER, REGULATOR).unwrap();
        registry
            .authorize_investigator(REGULATOR, INVESTIGATOR)
            .unwrap();
        registry
    }

    // =========================================================================
    // END-TO-END SCENARIOS
    // =========================================================================

    /// First submission: id 1, total 1, status Submitted.
    #[test]
    fn test_first_submission_end_to_end() {
        let mut registry = staffed_registry();
        let id = registry
            .submit_report(REPORTER, 2, 1001, 5001, "leak")
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(registry.get_total_stats().total, 1);
        assert_eq!(registry.get_report_info(1).status, ReportStatus::Submitted);
        assert_eq!(registry.get_location_stats(1001).total_reports, 1);
        assert_eq!(registry.get_reporter_stats(REPORTER), 1);

        // Regulator change, investigator grant, then the submission.
        let records = registry.audit_log().records();
        assert_eq!(records.len(), 3);
        assert!(matches!(
            records[2].event,
            RegistryEvent::ReportSubmitted { id: 1, .. }
        ));
        assert!(registry.audit_log().verify_chain().is_ok());
    }

    /// Authorize -> investigate -> complete, watching every observable.
    #[test]
    fn test_investigation_end_to_end() {
        let mut registry = staffed_registry();
        let id = registry
            .submit_report(REPORTER, 2, 1001, 5001, "leak")
            .unwrap();

        registry.start_investigation(INVESTIGATOR, id).unwrap();
        assert_eq!(
            registry.get_report_info(id).status,
            ReportStatus::Investigating
        );

        registry
            .complete_investigation(INVESTIGATOR, id, 2, "fixed")
            .unwrap();
        let report = registry.get_report_info(id);
        assert_eq!(report.status, ReportStatus::Resolved);
        assert!(report.is_processed);

        let investigation = registry.get_investigation_info(id);
        assert!(investigation.is_complete);
        assert_eq!(investigation.investigator, INVESTIGATOR);
        assert_eq!(investigation.final_safety_level, Some(SafetyLevel::Warning));
        assert_eq!(investigation.findings, "fixed");

        // Events landed in order: started, then completed.
        let events: Vec<_> = registry
            .audit_log()
            .records()
            .iter()
            .map(|record| record.event.clone())
            .collect();
        let started = events
            .iter()
            .position(|event| {
                matches!(event, RegistryEvent::InvestigationStarted { id: 1, investigator }
                    if *investigator == INVESTIGATOR)
            })
            .unwrap();
        let completed = events
            .iter()
            .position(|event| {
                matches!(event, RegistryEvent::InvestigationCompleted { id: 1, final_level }
                    if *final_level == SafetyLevel::Warning)
            })
            .unwrap();
        assert!(started < completed);

        assert!(registry.audit_log().verify_chain().is_ok());
        assert!(registry.verify_invariants().is_ok());
    }

    /// A mixed day of traffic: many reporters, locations, and transitions.
    #[test]
    fn test_mixed_traffic_keeps_counters_consistent() {
        let mut registry = staffed_registry();

        let mut ids = Vec::new();
        for (tag, level, location) in [
            (1u8, 1u8, 1001u32),
            (2, 4, 1001),
            (3, 2, 2002),
            (4, 3, 2002),
            (5, 0, 3003),
        ] {
            let reporter = AccountId::new([tag; 20]);
            ids.push(
                registry
                    .submit_report(reporter, level, location, 7000, "")
                    .unwrap(),
            );
        }

        // Triage the first three, investigate one, close one by emergency.
        registry
            .batch_update_status(REGULATOR, &ids[..3], ReportStatus::UnderReview)
            .unwrap();
        registry.start_investigation(INVESTIGATOR, ids[0]).unwrap();
        registry
            .complete_investigation(INVESTIGATOR, ids[0], 1, "cleaned")
            .unwrap();
        registry
            .emergency_close(OWNER, ids[4], "fraudulent submission")
            .unwrap();

        let totals = registry.get_total_stats();
        assert_eq!(totals.total, 5);
        assert_eq!(totals.submitted, 1);
        assert_eq!(totals.under_review, 2);
        assert_eq!(totals.investigating, 0);
        assert_eq!(totals.resolved, 1);
        assert_eq!(totals.closed, 1);
        assert_eq!(totals.bucket_sum(), totals.total);

        let loc1001 = registry.get_location_stats(1001);
        assert_eq!(loc1001.total_reports, 2);
        assert_eq!(loc1001.resolved_reports, 1);
        assert_eq!(loc1001.average_safety_level, Some(2)); // (1 + 4) / 2

        assert!(registry.audit_log().verify_chain().is_ok());
        assert!(registry.verify_invariants().is_ok());
    }

    // =========================================================================
    // ATOMICITY
    // =========================================================================

    /// One bad id poisons the whole batch; nothing is applied.
    #[test]
    fn test_batch_atomicity_across_the_api() {
        let mut registry = staffed_registry();
        let a = registry.submit_report(REPORTER, 1, 1, 1, "").unwrap();
        let b = registry.submit_report(REPORTER, 2, 1, 1, "").unwrap();
        let snapshot = registry.get_total_stats();
        let tip = registry.audit_log().tip_hash();

        let err = registry
            .batch_update_status(REGULATOR, &[a, b, 404], ReportStatus::UnderReview)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::UnknownReport(404))
        ));

        assert_eq!(registry.get_report_info(a).status, ReportStatus::Submitted);
        assert_eq!(registry.get_report_info(b).status, ReportStatus::Submitted);
        assert_eq!(registry.get_total_stats(), snapshot);
        assert_eq!(registry.audit_log().tip_hash(), tip);
    }

    /// Terminal states stay terminal through the manual path.
    #[test]
    fn test_lifecycle_cannot_run_backwards() {
        let mut registry = staffed_registry();
        let id = registry.submit_report(REPORTER, 2, 1, 1, "").unwrap();
        registry.start_investigation(REGULATOR, id).unwrap();
        registry
            .complete_investigation(REGULATOR, id, 3, "done")
            .unwrap();

        for status in [
            ReportStatus::Submitted,
            ReportStatus::UnderReview,
            ReportStatus::Investigating,
        ] {
            assert!(registry.update_status(REGULATOR, id, status).is_err());
        }
        assert_eq!(registry.get_report_info(id).status, ReportStatus::Resolved);
    }

    /// Emergency close wins over an open investigation; the investigation can
    /// no longer conclude.
    #[test]
    fn test_emergency_close_outranks_open_investigation() {
        let mut registry = staffed_registry();
        let id = registry.submit_report(REPORTER, 3, 1, 1, "").unwrap();
        registry.start_investigation(INVESTIGATOR, id).unwrap();
        registry
            .emergency_close(OWNER, id, "regulator request")
            .unwrap();

        let err = registry
            .complete_investigation(INVESTIGATOR, id, 1, "late")
            .unwrap_err();
        assert!(matches!(err, RegistryError::State(_)));

        let info = registry.get_report_info(id);
        assert_eq!(info.status, ReportStatus::Closed);
        assert!(!info.is_valid);
        assert!(registry.verify_invariants().is_ok());
    }

    // =========================================================================
    // AUDIT TRAIL
    // =========================================================================

    /// The emergency-close reason is recorded on the chain.
    #[test]
    fn test_emergency_reason_lands_on_the_chain() {
        let mut registry = staffed_registry();
        let id = registry.submit_report(REPORTER, 4, 9, 9, "").unwrap();
        registry
            .emergency_close(OWNER, id, "salmonella recall 2026-031")
            .unwrap();

        let record = registry.audit_log().records().last().unwrap().clone();
        assert_eq!(record.note.as_deref(), Some("salmonella recall 2026-031"));
        assert!(matches!(
            record.event,
            RegistryEvent::ReportStatusChanged {
                status: ReportStatus::Closed,
                ..
            }
        ));
    }

    /// Every record serializes for external indexers.
    #[test]
    fn test_audit_records_are_serializable() {
        let mut registry = staffed_registry();
        let id = registry.submit_report(REPORTER, 2, 1, 1, "leak").unwrap();
        registry
            .update_status(REGULATOR, id, ReportStatus::UnderReview)
            .unwrap();

        for record in registry.audit_log().records() {
            let json = serde_json::to_string(record).unwrap();
            let back: EventRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, record);
        }
    }
}
