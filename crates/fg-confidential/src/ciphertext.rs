//! # Ciphertext Handles
//!
//! Opaque masked-value handles produced by a vault. A ciphertext is defined
//! by its value, not its identity: cloning one yields an equally valid handle
//! into the same pad-ledger entry.

use crate::field::FieldElement;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A masked integer: payload = value + pad (mod p).
///
/// The pad lives inside the vault that produced this handle; the payload on
/// its own carries no information about the sealed value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    handle: Uuid,
    payload: FieldElement,
}

impl Ciphertext {
    /// Assemble a ciphertext. Only vaults construct these.
    #[must_use]
    pub(crate) fn new(handle: Uuid, payload: FieldElement) -> Self {
        Self { handle, payload }
    }

    /// The ledger handle identifying this ciphertext's pad.
    #[must_use]
    pub fn handle(&self) -> Uuid {
        self.handle
    }

    /// The masked payload.
    #[must_use]
    pub fn payload(&self) -> FieldElement {
        self.payload
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload is masked, but printing it invites log-diffing; show
        // only the handle.
        write!(f, "Ciphertext({})", self.handle)
    }
}
