//! # FG-Registry - Food-Safety Incident Registry
//!
//! ## Purpose
//!
//! Lets any caller submit a food-safety concern without identifying text,
//! while a regulator and authorized investigators move each report through a
//! fixed investigation lifecycle. Running statistics are maintained
//! incrementally and every mutation lands on a tamper-evident, append-only
//! audit chain.
//!
//! ## Lifecycle
//!
//! ```text
//! Submitted ──> UnderReview ──> Investigating ──> Resolved
//!     │              │               │
//!     └──────────────┴───────────────┴─────emergency────> Closed
//! ```
//!
//! Manual regulator transitions move strictly forward; `Investigating` and
//! `Resolved` are normally reached through the investigation operations, and
//! `Closed` only through the owner's emergency path.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Status buckets sum to the total | `domain/invariants.rs` - `check_bucket_sum_invariant()` |
//! | Report ids dense from 1 | `domain/invariants.rs` - `check_dense_ids_invariant()` |
//! | Investigations linked to reports that reached `Investigating` | `domain/invariants.rs` - `check_investigation_linkage_invariant()` |
//! | Per-reporter/location counts sum to the total | `domain/invariants.rs` - `check_aggregate_sum_invariant()` |
//! | Forward-only status graph | `domain/value_objects.rs` - `ReportStatus::can_advance_to()` |
//! | Safety level in [0, 4] | `domain/value_objects.rs` - `SafetyLevel::try_from()` |
//!
//! ## Security
//!
//! - **Envelope-Only Identity**: the caller handle passed by the dispatch
//!   layer is the sole identity source; payloads carry no identity fields.
//! - **Capability Checks**: every operation evaluates explicit predicates
//!   over the single `AccessState` value at its top.
//! - **Confidential Severity**: safety levels are stored as vault
//!   ciphertexts; aggregates accumulate homomorphically and reveal only
//!   through a minted authority.
//!
//! ## Usage Example
//!
//! ```ignore
//! use fg_registry::prelude::*;
//!
//! let owner = AccountId::new([1; 20]);
//! let mut registry = create_test_service(owner);
//!
//! let id = registry.submit_report(owner, 2, 1001, 5001, "leak")?;
//! assert_eq!(registry.get_report_info(id).status, ReportStatus::Submitted);
//! assert_eq!(registry.get_total_stats().total, 1);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{Investigation, InvestigationInfo, Report, ReportInfo};

    // Value objects
    pub use crate::domain::value_objects::{
        AccountId, FoodTypeCode, LocationCode, ReportId, ReportStatus, SafetyLevel, UnixTimestamp,
    };

    // Access control and statistics
    pub use crate::domain::access::AccessState;
    pub use crate::domain::stats::{LocationStatsView, StatsLedger, TotalStats};
    pub use crate::domain::RegistryStore;

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::FoodSafetyApi;
    pub use crate::ports::outbound::{Clock, ConfidentialVault, EventSink};

    // Events
    pub use crate::events::{ChainHash, EventRecord, RegistryEvent, GENESIS_HASH};

    // Errors
    pub use crate::errors::{AuthorizationError, RegistryError, StateError, ValidationError};

    // Adapters
    pub use crate::adapters::{InMemoryAuditLog, ManualClock, SystemClock};

    // Service
    pub use crate::service::{create_test_service, RegistryConfig, RegistryService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
