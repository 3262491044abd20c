//! Account Ledger Library
//! # Overview
//!
//! This library models bank accounts whose balance is derived from a history
//! of credit and debit movements, and replays CSV operation files against them
//! with either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (account numbers, movements, operation records, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - The account: balance, limit, movements and their rules
//!   - [`core::registry`] - Concurrent registry of open accounts
//!   - [`core::engine`] - Operation routing
//!   - [`core::batch_processor`] - Per-account concurrent batch processing
//! - [`io`] - CSV reading and report writing
//! - [`strategy`] - Sync and async replay pipelines
//! - [`telemetry`] - Tracing subscriber setup
//!
//! # Operations
//!
//! - **open** / **close**: Register or remove an account (only without movements)
//! - **number**: Assign the account number (`99999-9`)
//! - **deposit_cash**: Credit confirmed immediately
//! - **deposit_check**: Credit pending until confirmed
//! - **withdraw**: Debit, if balance plus limit covers it
//! - **confirm**: Confirm a pending movement (idempotent)
//! - **set_limit**: Set the overdraft limit of a special account
//!
//! # Account State
//!
//! - `balance`: Sum of confirmed credits minus confirmed debits
//! - `limit`: Overdraft allowance, only non-zero for special accounts
//! - `available`: `balance + limit`
//!
//! ```
//! use account_ledger::Account;
//! use rust_decimal::Decimal;
//!
//! let account = Account::new(1);
//! account.deposit_cash(Decimal::new(100, 0)).unwrap();
//! assert!(account.withdraw(Decimal::new(150, 0)).is_err());
//! assert_eq!(account.total_available(), Decimal::new(100, 0));
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use core::{Account, AccountRegistry, LedgerEngine};
pub use io::{write_accounts_csv, write_statement_csv};
pub use types::{
    AccountId, AccountNumber, AccountSnapshot, LedgerError, Movement, MovementId, MovementKind,
    OperationRecord, OperationType,
};
