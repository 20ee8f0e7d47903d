//! Vault error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors from confidential value operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Ciphertext handle not found in the pad ledger.
    #[error("unknown ciphertext handle: {0}")]
    UnknownCiphertext(Uuid),

    /// The presented authority token is not recognized by this vault.
    #[error("reveal not authorized for this vault")]
    UnauthorizedReveal,

    /// Plaintext value too large to seal.
    #[error("value {0} exceeds the sealable range")]
    ValueOutOfRange(u64),

    /// Ciphertexts come from incompatible vaults.
    #[error("ciphertext was not produced by this vault")]
    ForeignCiphertext(Uuid),
}
