//! Traits at the ledger's collaborator seams
//!
//! The ledger does not own account lifecycle or check clearing. Those
//! workflows talk to it through the two traits below, so they can be written
//! (and tested) against any ledger implementation.

use crate::core::ledger::Account;
use crate::types::{LedgerError, MovementId};

/// Read access to an account's history, for lifecycle managers
///
/// An account with movements must not be deleted.
pub trait MovementHistory {
    /// Whether any movement was ever recorded
    fn has_movements(&self) -> bool;

    /// Number of recorded movements
    fn movement_count(&self) -> usize;
}

/// Confirmation of pending movements, for clearing workflows
pub trait MovementConfirmation {
    /// Confirm a movement by its ID
    ///
    /// Implementations apply the balance delta exactly once per movement:
    /// `Ok(true)` when this call applied it, `Ok(false)` when it was already
    /// confirmed.
    fn confirm_movement(&self, movement: MovementId) -> Result<bool, LedgerError>;
}

impl MovementHistory for Account {
    fn has_movements(&self) -> bool {
        Account::has_movements(self)
    }

    fn movement_count(&self) -> usize {
        Account::movement_count(self)
    }
}

impl MovementConfirmation for Account {
    fn confirm_movement(&self, movement: MovementId) -> Result<bool, LedgerError> {
        Account::confirm_movement(self, movement)
    }
}
