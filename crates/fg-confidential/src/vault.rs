//! # Vaults
//!
//! Two implementations of the confidential value capability:
//!
//! - [`MaskedVault`] - real sealing via additive masking with a pad ledger
//! - [`TransparentVault`] - zero pad, free reveal, for deployments that opt
//!   out of confidentiality
//!
//! Both produce [`Ciphertext`] handles, so consumers are written once against
//! the handle type and swap vaults without code changes.

use crate::ciphertext::Ciphertext;
use crate::errors::VaultError;
use crate::field::{FieldElement, GOLDILOCKS_PRIME};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Token required to reveal a sealed value.
///
/// Minted by a vault and checked on every reveal. Tokens are bearer
/// capabilities: hold one, and the vault will decrypt for you.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RevealAuthority {
    token: [u8; 32],
}

impl RevealAuthority {
    fn random() -> Self {
        Self {
            token: rand::thread_rng().gen(),
        }
    }

    /// The all-zero token used by transparent vaults.
    #[must_use]
    pub fn open() -> Self {
        Self { token: [0u8; 32] }
    }
}

impl std::fmt::Debug for RevealAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token.
        write!(f, "RevealAuthority(..)")
    }
}

// =============================================================================
// MASKED VAULT
// =============================================================================

/// Additively homomorphic vault over the Goldilocks field.
///
/// `seal` draws a random pad r and stores it under a fresh handle; the
/// ciphertext payload is `value + r (mod p)`. `add` combines two ciphertexts
/// by adding payloads and pads, so `reveal(add(seal(a), seal(b))) == a + b`.
#[derive(Debug, Default)]
pub struct MaskedVault {
    /// Pad ledger: handle -> pad. Never exposed.
    pads: HashMap<Uuid, FieldElement>,
    /// Recognized reveal tokens.
    authorities: HashSet<[u8; 32]>,
}

/// Largest plaintext a vault accepts. Keeps sums of sealed counters well away
/// from the modulus.
pub const MAX_SEALABLE: u64 = u32::MAX as u64;

impl MaskedVault {
    /// Create an empty vault with no authorities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new reveal authority recognized by this vault.
    pub fn mint_authority(&mut self) -> RevealAuthority {
        let authority = RevealAuthority::random();
        self.authorities.insert(authority.token);
        authority
    }

    /// Withdraw a previously minted authority. Idempotent.
    pub fn revoke_authority(&mut self, authority: &RevealAuthority) {
        self.authorities.remove(&authority.token);
    }

    /// Seal a plaintext value.
    pub fn seal(&mut self, value: u64) -> Result<Ciphertext, VaultError> {
        if value > MAX_SEALABLE {
            return Err(VaultError::ValueOutOfRange(value));
        }
        let pad = FieldElement::new(rand::thread_rng().gen_range(0..GOLDILOCKS_PRIME));
        let handle = Uuid::new_v4();
        self.pads.insert(handle, pad);
        Ok(Ciphertext::new(handle, FieldElement::new(value) + pad))
    }

    /// Homomorphically add two ciphertexts.
    ///
    /// The result is a fresh ciphertext whose pad is the sum of the operand
    /// pads; the operands stay valid.
    pub fn add(&mut self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, VaultError> {
        let pad_a = *self
            .pads
            .get(&a.handle())
            .ok_or(VaultError::UnknownCiphertext(a.handle()))?;
        let pad_b = *self
            .pads
            .get(&b.handle())
            .ok_or(VaultError::UnknownCiphertext(b.handle()))?;
        let handle = Uuid::new_v4();
        self.pads.insert(handle, pad_a + pad_b);
        Ok(Ciphertext::new(handle, a.payload() + b.payload()))
    }

    /// Reveal a sealed value to a holder of a recognized authority.
    pub fn reveal(
        &self,
        ciphertext: &Ciphertext,
        authority: &RevealAuthority,
    ) -> Result<u64, VaultError> {
        if !self.authorities.contains(&authority.token) {
            return Err(VaultError::UnauthorizedReveal);
        }
        let pad = self
            .pads
            .get(&ciphertext.handle())
            .ok_or(VaultError::UnknownCiphertext(ciphertext.handle()))?;
        Ok((ciphertext.payload() - *pad).value())
    }

    /// Number of pad-ledger entries (one per sealed or combined value).
    #[must_use]
    pub fn ledger_len(&self) -> usize {
        self.pads.len()
    }
}

// =============================================================================
// TRANSPARENT VAULT
// =============================================================================

/// Pass-through vault for deployments without confidentiality.
///
/// Applies a zero pad, recognizes every authority, and reveals freely. The
/// handle shape is identical to [`MaskedVault`] output, so swapping vaults
/// changes no consumer code.
#[derive(Debug, Default)]
pub struct TransparentVault;

impl TransparentVault {
    /// Create a transparent vault.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Mint the open authority token.
    pub fn mint_authority(&mut self) -> RevealAuthority {
        RevealAuthority::open()
    }

    /// Seal with a zero pad.
    pub fn seal(&mut self, value: u64) -> Result<Ciphertext, VaultError> {
        if value > MAX_SEALABLE {
            return Err(VaultError::ValueOutOfRange(value));
        }
        Ok(Ciphertext::new(Uuid::new_v4(), FieldElement::new(value)))
    }

    /// Plain addition under fresh handles.
    pub fn add(&mut self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, VaultError> {
        Ok(Ciphertext::new(Uuid::new_v4(), a.payload() + b.payload()))
    }

    /// Always succeeds; the payload is the value.
    pub fn reveal(
        &self,
        ciphertext: &Ciphertext,
        _authority: &RevealAuthority,
    ) -> Result<u64, VaultError> {
        Ok(ciphertext.payload().value())
    }
}

// =============================================================================
// TESTS
// =============================================================================
