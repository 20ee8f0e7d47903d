//! # Registry Events
//!
//! Every mutating operation emits exactly one notification per affected
//! record, appended to an event sink after all of the operation's state
//! changes have been applied. The records form the sole externally
//! observable audit trail, linked into a SHA-256 hash chain so any later
//! tampering with a stored record is detectable.

use crate::domain::value_objects::{AccountId, ReportId, ReportStatus, SafetyLevel, UnixTimestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hash link in the audit chain.
pub type ChainHash = [u8; 32];

/// The chain link preceding the first record.
pub const GENESIS_HASH: ChainHash = [0u8; 32];

// =============================================================================
// EVENTS
// =============================================================================

/// Notifications emitted by the registry, one variant per observable
/// mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A report was accepted into the ledger.
    ReportSubmitted {
        /// Assigned id.
        id: ReportId,
        /// Submitting caller.
        submitter: AccountId,
        /// Submission time.
        timestamp: UnixTimestamp,
    },

    /// A report's lifecycle status changed (manual, investigation-driven, or
    /// emergency).
    ReportStatusChanged {
        /// Affected report.
        id: ReportId,
        /// New status.
        status: ReportStatus,
    },

    /// The owner replaced the regulator.
    RegulatorChanged {
        /// Outgoing regulator.
        previous: AccountId,
        /// Incoming regulator.
        current: AccountId,
    },

    /// The regulator granted investigator membership.
    InvestigatorAuthorized {
        /// Newly authorized identity.
        investigator: AccountId,
    },

    /// The regulator withdrew investigator membership.
    InvestigatorRevoked {
        /// Revoked identity.
        investigator: AccountId,
    },

    /// An investigation was opened.
    InvestigationStarted {
        /// Affected report.
        id: ReportId,
        /// Investigator of record.
        investigator: AccountId,
    },

    /// An investigation concluded.
    InvestigationCompleted {
        /// Affected report.
        id: ReportId,
        /// Final assessed severity.
        final_level: SafetyLevel,
    },
}

// =============================================================================
// AUDIT RECORDS
// =============================================================================

/// One appended audit entry.
///
/// `entry_hash = SHA-256(seq || timestamp || prev_hash || event || note)`,
/// with the event serialized to canonical JSON. Recomputing the chain from
/// `GENESIS_HASH` verifies that no stored record was altered or dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Zero-based position in the log.
    pub seq: u64,
    /// Time the operation committed.
    pub timestamp: UnixTimestamp,
    /// The notification itself.
    pub event: RegistryEvent,
    /// Free-form annotation (the emergency-close reason).
    pub note: Option<String>,
    /// Hash of the previous record (`GENESIS_HASH` for the first).
    pub prev_hash: ChainHash,
    /// Hash over this record's content and `prev_hash`.
    pub entry_hash: ChainHash,
}

impl EventRecord {
    /// Builds the next record in a chain.
    #[must_use]
    pub fn chained(
        seq: u64,
        timestamp: UnixTimestamp,
        event: RegistryEvent,
        note: Option<String>,
        prev_hash: ChainHash,
    ) -> Self {
        let entry_hash = hash_entry(seq, timestamp, &event, note.as_deref(), &prev_hash);
        Self {
            seq,
            timestamp,
            event,
            note,
            prev_hash,
            entry_hash,
        }
    }

    /// Recomputes this record's hash from its own fields.
    #[must_use]
    pub fn recompute_hash(&self) -> ChainHash {
        hash_entry(
            self.seq,
            self.timestamp,
            &self.event,
            self.note.as_deref(),
            &self.prev_hash,
        )
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {:?} [{}]",
            self.seq,
            self.event,
            hex::encode(&self.entry_hash[..8])
        )
    }
}

/// Hash over one record's content and its predecessor link.
fn hash_entry(
    seq: u64,
    timestamp: UnixTimestamp,
    event: &RegistryEvent,
    note: Option<&str>,
    prev_hash: &ChainHash,
) -> ChainHash {
    let mut hasher = Sha256::new();
    hasher.update(seq.to_be_bytes());
    hasher.update(timestamp.to_be_bytes());
    hasher.update(prev_hash);
    // Serialization of a closed enum over plain fields cannot fail.
    let payload = serde_json::to_vec(event).expect("event serialization is infallible");
    hasher.update(&payload);
    if let Some(note) = note {
        hasher.update(note.as_bytes());
    }
    hasher.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================
