//! # Value Objects
//!
//! Immutable domain primitives for the registry. These types represent
//! concepts defined by their value, not identity, and make the enumerated
//! fields closed: an out-of-range safety level or status cannot exist past
//! the trust boundary.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report identifier. Dense and strictly increasing, assigned from 1.
pub type ReportId = u64;

/// 32-bit location code attached to a report.
pub type LocationCode = u32;

/// 32-bit food-type code attached to a report.
pub type FoodTypeCode = u32;

/// Seconds since the Unix epoch. Zero is the "never" sentinel.
pub type UnixTimestamp = u64;

// =============================================================================
// ACCOUNT ID (20 bytes)
// =============================================================================

/// A 20-byte opaque caller handle.
///
/// The dispatch layer authenticates callers and hands the registry this
/// handle; the registry never looks inside it. Report content carries no
/// identifying text, but the handle is recorded for per-submitter statistics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The zero handle, used as the "nobody" sentinel.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates a handle from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates a handle from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero handle.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// SAFETY LEVEL
// =============================================================================

/// Ordinal severity classification of a report.
///
/// Parses from the wire as a raw `u8`; values above 4 are rejected before a
/// typed level can exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SafetyLevel {
    /// Severity not yet assessed.
    Unknown,
    /// Assessed safe.
    Safe,
    /// Elevated concern.
    Warning,
    /// Active hazard.
    Danger,
    /// Immediate public-health threat.
    Critical,
}

impl SafetyLevel {
    /// Ordinal encoding (0-4).
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Safe => 1,
            Self::Warning => 2,
            Self::Danger => 3,
            Self::Critical => 4,
        }
    }
}

impl TryFrom<u8> for SafetyLevel {
    type Error = ValidationError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Safe),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Danger),
            4 => Ok(Self::Critical),
            _ => Err(ValidationError::SafetyLevelOutOfRange(raw)),
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// REPORT STATUS
// =============================================================================

/// Lifecycle status of a report.
///
/// The graph is forward-only: `Submitted -> UnderReview -> Investigating ->
/// Resolved`, with `Closed` reachable from any state through the owner's
/// emergency path only. `Resolved` and `Closed` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    /// Freshly submitted, awaiting triage.
    #[default]
    Submitted,
    /// Triaged by the regulator.
    UnderReview,
    /// An investigation is (or was) active.
    Investigating,
    /// Investigation finished with a final assessment.
    Resolved,
    /// Forced shut by the owner's emergency action.
    Closed,
}

impl ReportStatus {
    /// Position in the lifecycle order, used for forward-only checks.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Submitted => 0,
            Self::UnderReview => 1,
            Self::Investigating => 2,
            Self::Resolved => 3,
            Self::Closed => 4,
        }
    }

    /// Terminal states admit no further transitions outside the emergency
    /// path.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Whether the regulator's manual path may move a report from `self` to
    /// `next`. Forward-only, never out of a terminal state, and never into
    /// `Closed` (reserved for the emergency path).
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        if self.is_terminal() || next == Self::Closed {
            return false;
        }
        next.rank() > self.rank()
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under-review",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
