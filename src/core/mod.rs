//! Core business logic module
//!
//! This module contains the account ledger and its collaborators:
//! - `ledger` - The account: balance, limit, movements and their rules
//! - `traits` - Seams for lifecycle and confirmation workflows
//! - `registry` - Concurrent registry of open accounts
//! - `engine` - Routing of operation records to the registry and ledger
//! - `batch_processor` - Per-account concurrent processing of record batches

pub mod batch_processor;
pub mod engine;
pub mod ledger;
pub mod registry;
pub mod traits;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::LedgerEngine;
pub use ledger::Account;
pub use registry::AccountRegistry;
pub use traits::{MovementConfirmation, MovementHistory};
