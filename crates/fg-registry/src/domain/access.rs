//! # Access Control State
//!
//! The single source of authorization truth. Every operation in the registry
//! evaluates these predicates at its top; no other component stores role
//! information.

use crate::domain::value_objects::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Owner, regulator, and the authorized-investigator set.
///
/// The owner is fixed at creation. The regulator defaults to the owner and is
/// replaced only by the owner. Investigator membership is managed only by the
/// regulator. Lives for the system's entire lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessState {
    owner: AccountId,
    regulator: AccountId,
    investigators: HashSet<AccountId>,
}

impl AccessState {
    /// Creates the access singleton. The creator becomes owner and initial
    /// regulator.
    #[must_use]
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            regulator: owner,
            investigators: HashSet::new(),
        }
    }

    // =========================================================================
    // PREDICATES
    // =========================================================================

    /// Whether `caller` is the owner.
    #[must_use]
    pub fn is_owner(&self, caller: AccountId) -> bool {
        caller == self.owner
    }

    /// Whether `caller` is the current regulator.
    #[must_use]
    pub fn is_regulator(&self, caller: AccountId) -> bool {
        caller == self.regulator
    }

    /// Whether `caller` is in the authorized-investigator set.
    #[must_use]
    pub fn is_authorized_investigator(&self, caller: AccountId) -> bool {
        self.investigators.contains(&caller)
    }

    /// The owner handle.
    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The current regulator handle.
    #[must_use]
    pub fn regulator(&self) -> AccountId {
        self.regulator
    }

    /// Number of authorized investigators.
    #[must_use]
    pub fn investigator_count(&self) -> usize {
        self.investigators.len()
    }

    // =========================================================================
    // MUTATORS
    // =========================================================================
    //
    // Authorization is checked by the caller against the predicates above;
    // these only record the change. Each returns whether state actually
    // changed, so idempotent re-grants emit no duplicate notifications.

    /// Replaces the regulator. Returns false when `next` already holds the
    /// role.
    pub fn set_regulator(&mut self, next: AccountId) -> bool {
        if self.regulator == next {
            return false;
        }
        self.regulator = next;
        true
    }

    /// Adds an investigator. Idempotent.
    pub fn authorize_investigator(&mut self, investigator: AccountId) -> bool {
        self.investigators.insert(investigator)
    }

    /// Removes an investigator. Idempotent.
    pub fn revoke_investigator(&mut self, investigator: AccountId) -> bool {
        self.investigators.remove(&investigator)
    }
}

// =============================================================================
// TESTS
// =============================================================================
