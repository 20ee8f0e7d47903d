//! # Vault Wiring
//!
//! Implements the [`ConfidentialVault`] port for the two vault schemes in
//! `fg-confidential`. The service never names a concrete vault; deployments
//! pick one here.

use crate::ports::outbound::ConfidentialVault;
use fg_confidential::{Ciphertext, MaskedVault, RevealAuthority, TransparentVault, VaultError};

impl ConfidentialVault for MaskedVault {
    fn seal(&mut self, value: u64) -> Result<Ciphertext, VaultError> {
        MaskedVault::seal(self, value)
    }

    fn add(&mut self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, VaultError> {
        MaskedVault::add(self, a, b)
    }

    fn reveal(
        &self,
        ciphertext: &Ciphertext,
        authority: &RevealAuthority,
    ) -> Result<u64, VaultError> {
        MaskedVault::reveal(self, ciphertext, authority)
    }

    fn mint_authority(&mut self) -> RevealAuthority {
        MaskedVault::mint_authority(self)
    }

    fn is_sealing(&self) -> bool {
        true
    }
}

impl ConfidentialVault for TransparentVault {
    fn seal(&mut self, value: u64) -> Result<Ciphertext, VaultError> {
        TransparentVault::seal(self, value)
    }

    fn add(&mut self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, VaultError> {
        TransparentVault::add(self, a, b)
    }

    fn reveal(
        &self,
        ciphertext: &Ciphertext,
        authority: &RevealAuthority,
    ) -> Result<u64, VaultError> {
        TransparentVault::reveal(self, ciphertext, authority)
    }

    fn mint_authority(&mut self) -> RevealAuthority {
        TransparentVault::mint_authority(self)
    }

    fn is_sealing(&self) -> bool {
        false
    }
}

// =============================================================================
// TESTS
// =============================================================================
