//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifiers, numbers and snapshots
//! - `movement`: Movement entries and their kinds
//! - `operation`: Operation records replayed against the ledger
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod movement;
pub mod operation;

pub use account::{AccountId, AccountNumber, AccountSnapshot};
pub use error::LedgerError;
pub use movement::{Movement, MovementId, MovementKind};
pub use operation::{OperationRecord, OperationType};
