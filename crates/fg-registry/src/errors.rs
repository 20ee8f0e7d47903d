//! # Error Types
//!
//! All error types for registry operations. Every error aborts its operation
//! before the first state change, so a failed call never leaves a partial
//! mutation behind.

use crate::domain::value_objects::{AccountId, ReportId, ReportStatus};
use fg_confidential::VaultError;
use thiserror::Error;

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// Caller lacks the role an operation requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Operation is restricted to the owner.
    #[error("caller {0} is not the owner")]
    NotOwner(AccountId),

    /// Operation is restricted to the regulator.
    #[error("caller {0} is not the regulator")]
    NotRegulator(AccountId),

    /// Operation requires an authorized investigator (or the regulator).
    #[error("caller {0} is not an authorized investigator")]
    NotInvestigator(AccountId),

    /// Operation is restricted to the investigation's assigned investigator
    /// (or the regulator).
    #[error("caller {0} is not the assigned investigator")]
    NotAssignedInvestigator(AccountId),

    /// Operation requires the owner or the regulator.
    #[error("caller {0} holds no privileged role")]
    NotPrivileged(AccountId),
}

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Input refers to something that does not exist or is out of range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Safety level outside [0, 4].
    #[error("safety level {0} is out of range (0-4)")]
    SafetyLevelOutOfRange(u8),

    /// No report with this id.
    #[error("unknown report id: {0}")]
    UnknownReport(ReportId),

    /// No investigation exists for this report.
    #[error("no investigation exists for report {0}")]
    NoInvestigation(ReportId),

    /// Description exceeds the configured byte limit.
    #[error("description is {len} bytes, limit is {max}")]
    DescriptionTooLong {
        /// Submitted length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Findings exceed the configured byte limit.
    #[error("findings are {len} bytes, limit is {max}")]
    FindingsTooLong {
        /// Submitted length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Batch exceeds the configured length cap.
    #[error("batch of {len} ids exceeds the limit of {max}")]
    BatchTooLarge {
        /// Submitted batch length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Operation is not legal in the report's current lifecycle state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The requested manual transition is not on the forward-only graph.
    #[error("report {id}: illegal transition {from} -> {to}")]
    IllegalTransition {
        /// Report being moved.
        id: ReportId,
        /// Current status.
        from: ReportStatus,
        /// Requested status.
        to: ReportStatus,
    },

    /// The report's status does not admit a new investigation.
    #[error("report {id} is {status}, not open for investigation")]
    NotInvestigable {
        /// Report in question.
        id: ReportId,
        /// Its current status.
        status: ReportStatus,
    },

    /// Investigation already complete.
    #[error("investigation for report {0} is already complete")]
    InvestigationAlreadyComplete(ReportId),

    /// The report was emergency-closed while its investigation was open; the
    /// close is authoritative.
    #[error("report {0} was emergency-closed; investigation cannot conclude")]
    ReportClosed(ReportId),
}

// =============================================================================
// OPERATION-LEVEL ERROR
// =============================================================================

/// Sum of everything a registry operation can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller lacks the required role.
    #[error("authorization: {0}")]
    Authorization(#[from] AuthorizationError),

    /// Input failed validation.
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    /// Operation illegal in the current lifecycle state.
    #[error("state: {0}")]
    State(#[from] StateError),

    /// The confidential value layer refused an operation.
    #[error("vault: {0}")]
    Vault(#[from] VaultError),
}

// =============================================================================
// TESTS
// =============================================================================
