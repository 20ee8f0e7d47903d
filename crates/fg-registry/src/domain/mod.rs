//! # Registry Domain
//!
//! Entities, value objects, access control, statistics, and invariant checks.
//! The whole mutable state of the system is one [`RegistryStore`] value
//! threaded through every operation; there is no hidden global state and no
//! teardown (the registry runs indefinitely).

pub mod access;
pub mod entities;
pub mod invariants;
pub mod stats;
pub mod value_objects;

use crate::domain::access::AccessState;
use crate::domain::entities::{Investigation, Report};
use crate::domain::stats::StatsLedger;
use crate::domain::value_objects::{AccountId, LocationCode, ReportId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The registry's entire mutable state.
///
/// Reports and investigations are keyed by report id in ordered maps so
/// range enumeration follows assignment order. `next_id` makes ids dense:
/// every id in `1..next_id` is present in `reports`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryStore {
    /// Authorization singleton.
    pub access: AccessState,
    /// All report records, never deleted.
    pub reports: BTreeMap<ReportId, Report>,
    /// At most one investigation per report, created lazily.
    pub investigations: BTreeMap<ReportId, Investigation>,
    /// All aggregate counters.
    pub stats: StatsLedger,
    /// Report ids per location, appended on submission. An index, not a
    /// scan: enumeration queries read it directly.
    pub location_index: HashMap<LocationCode, Vec<ReportId>>,
    /// Next id to assign; starts at 1.
    pub next_id: ReportId,
}

impl RegistryStore {
    /// Creation-time initialization. The creator becomes owner and initial
    /// regulator.
    #[must_use]
    pub fn new(owner: AccountId) -> Self {
        Self {
            access: AccessState::new(owner),
            reports: BTreeMap::new(),
            investigations: BTreeMap::new(),
            stats: StatsLedger::new(),
            location_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of reports ever created.
    #[must_use]
    pub fn report_count(&self) -> u64 {
        self.next_id - 1
    }
}
