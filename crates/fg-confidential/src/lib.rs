//! # FG-Confidential: Masked Integer Vault
//!
//! Additively homomorphic confidential integers over the Goldilocks field.
//!
//! ## Components
//!
//! - `field` - Goldilocks field arithmetic (p = 2^64 - 2^32 + 1), additive group only
//! - `ciphertext` - Opaque masked-value handles
//! - `vault` - Sealing, homomorphic addition, and authorized reveal
//!
//! ## Model
//!
//! A vault seals a small non-negative integer by adding a random pad modulo
//! the Goldilocks prime and remembering the pad under a fresh handle. Two
//! sealed values can be added without revealing either one; the combined pad
//! is tracked so the sum stays decryptable. Reveal requires an authority
//! token minted by the same vault.
//!
//! The vault is a capability: callers hold it behind an interface and cannot
//! reach the pad ledger. Consumers that do not need confidentiality use
//! [`TransparentVault`], which applies a zero pad and reveals freely.

#![warn(missing_docs)]

pub mod ciphertext;
pub mod errors;
pub mod field;
pub mod vault;

pub use ciphertext::Ciphertext;
pub use errors::VaultError;
pub use field::{FieldElement, GOLDILOCKS_PRIME};
pub use vault::{MaskedVault, RevealAuthority, TransparentVault};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
