//! # Driven Ports (Outbound)
//!
//! Interfaces the registry depends on. Adapters implement these traits to
//! provide confidential value handling, audit persistence, and time.
//! Dependencies point inward: the service is written against these traits
//! and never against a concrete adapter.

use crate::domain::value_objects::UnixTimestamp;
use crate::events::{ChainHash, RegistryEvent};
use fg_confidential::{Ciphertext, RevealAuthority, VaultError};

// =============================================================================
// CONFIDENTIAL VALUE CAPABILITY
// =============================================================================

/// Injected confidential-integer capability.
///
/// The registry routes every read or accumulation of a protected field
/// through this interface and never assumes plaintext is available. Range
/// validation of protected inputs happens before sealing, at the trust
/// boundary.
pub trait ConfidentialVault: Send + Sync {
    /// Seal a plaintext value into a ciphertext handle.
    fn seal(&mut self, value: u64) -> Result<Ciphertext, VaultError>;

    /// Homomorphically add two ciphertexts; the operands stay valid.
    fn add(&mut self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, VaultError>;

    /// Decrypt for a holder of a recognized authority.
    fn reveal(&self, ciphertext: &Ciphertext, authority: &RevealAuthority)
        -> Result<u64, VaultError>;

    /// Mint an authority token recognized by this vault.
    fn mint_authority(&mut self) -> RevealAuthority;

    /// Whether this vault actually hides plaintext. Transparent deployments
    /// return false, letting queries include plaintext severity in views.
    fn is_sealing(&self) -> bool;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Append-only audit destination.
///
/// The service appends exactly one event per observable mutation, after all
/// state changes of the operation have been applied. Implementations chain
/// records so external auditors can verify nothing was altered or dropped.
pub trait EventSink: Send + Sync {
    /// Append one notification, with an optional annotation (the
    /// emergency-close reason).
    fn append(&mut self, timestamp: UnixTimestamp, event: RegistryEvent, note: Option<String>);

    /// Number of records appended so far.
    fn len(&self) -> usize;

    /// True when nothing has been appended.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hash of the most recent record (`GENESIS_HASH` when empty).
    fn tip_hash(&self) -> ChainHash;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Time source for record stamps.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> UnixTimestamp;
}
