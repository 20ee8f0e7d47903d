//! # In-Memory Audit Log
//!
//! Append-only, hash-chained event storage. Production deployments would
//! persist records to an external indexer; the chain format is identical.

use crate::domain::value_objects::UnixTimestamp;
use crate::events::{ChainHash, EventRecord, RegistryEvent, GENESIS_HASH};
use crate::ports::outbound::EventSink;
use thiserror::Error;

/// A break found while walking the chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainDefect {
    /// A record's stored hash does not match its content.
    #[error("record {0} content does not match its hash")]
    TamperedRecord(u64),

    /// A record's predecessor link does not match the previous record.
    #[error("record {0} is not linked to its predecessor")]
    BrokenLink(u64),

    /// Sequence numbers are not dense from zero.
    #[error("record {0} carries an out-of-order sequence number")]
    BadSequence(u64),
}

/// Append-only audit log with SHA-256 chaining.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    records: Vec<EventRecord>,
}

impl InMemoryAuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in append order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Walks the chain from genesis, verifying sequence numbers, content
    /// hashes, and predecessor links.
    pub fn verify_chain(&self) -> Result<(), ChainDefect> {
        let mut prev_hash = GENESIS_HASH;
        for (position, record) in self.records.iter().enumerate() {
            if record.seq != position as u64 {
                return Err(ChainDefect::BadSequence(position as u64));
            }
            if record.prev_hash != prev_hash {
                return Err(ChainDefect::BrokenLink(record.seq));
            }
            if record.entry_hash != record.recompute_hash() {
                return Err(ChainDefect::TamperedRecord(record.seq));
            }
            prev_hash = record.entry_hash;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut Vec<EventRecord> {
        &mut self.records
    }
}

impl EventSink for InMemoryAuditLog {
    fn append(&mut self, timestamp: UnixTimestamp, event: RegistryEvent, note: Option<String>) {
        let seq = self.records.len() as u64;
        let prev_hash = self.tip_hash();
        self.records
            .push(EventRecord::chained(seq, timestamp, event, note, prev_hash));
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn tip_hash(&self) -> ChainHash {
        self.records
            .last()
            .map_or(GENESIS_HASH, |record| record.entry_hash)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AccountId, ReportStatus};

    fn submitted(id: u64) -> RegistryEvent {
        RegistryEvent::ReportSubmitted {
            id,
            submitter: AccountId::new([3; 20]),
            timestamp: 100,
        }
    }

    fn filled_log() -> InMemoryAuditLog {
        let mut log = InMemoryAuditLog::new();
        log.append(100, submitted(1), None);
        log.append(110, submitted(2), None);
        log.append(
            120,
            RegistryEvent::ReportStatusChanged {
                id: 1,
                status: ReportStatus::Closed,
            },
            Some("contaminated batch recall".to_string()),
        );
        log
    }

    #[test]
    fn test_append_links_records() {
        let log = filled_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log.records()[0].prev_hash, GENESIS_HASH);
        assert_eq!(log.records()[1].prev_hash, log.records()[0].entry_hash);
        assert_eq!(log.records()[2].prev_hash, log.records()[1].entry_hash);
        assert_eq!(log.tip_hash(), log.records()[2].entry_hash);
    }

    #[test]
    fn test_intact_chain_verifies() {
        assert_eq!(filled_log().verify_chain(), Ok(()));
        assert_eq!(InMemoryAuditLog::new().verify_chain(), Ok(()));
    }

    #[test]
    fn test_tampered_content_is_detected() {
        let mut log = filled_log();
        log.records_mut()[1].event = submitted(99);
        assert_eq!(log.verify_chain(), Err(ChainDefect::TamperedRecord(1)));
    }

    #[test]
    fn test_rewritten_history_is_detected() {
        let mut log = filled_log();
        // Rewrite record 0 consistently with itself; record 1's link breaks.
        let forged = EventRecord::chained(0, 100, submitted(42), None, GENESIS_HASH);
        log.records_mut()[0] = forged;
        assert_eq!(log.verify_chain(), Err(ChainDefect::BrokenLink(1)));
    }

    #[test]
    fn test_dropped_record_is_detected() {
        let mut log = filled_log();
        log.records_mut().remove(1);
        assert!(log.verify_chain().is_err());
    }
}
