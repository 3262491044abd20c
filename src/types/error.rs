//! Error types for the account ledger
//!
//! This module defines all error types that can occur while operating on an
//! account or replaying a file of ledger operations.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Malformed account numbers, non-positive amounts
//! - **Rule Errors**: Overdraft limit on a non-special account, insufficient funds
//! - **Lifecycle Errors**: Unknown or duplicate accounts, closing an account with history
//! - **Replay Errors**: File not found, CSV parsing, missing fields
//!
//! Every ledger error is rejected before any state mutation, so the account is
//! left exactly as it was before the failing call.

use super::account::AccountId;
use super::movement::MovementId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the account ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Account number does not match the `99999-9` pattern
    #[error("Invalid account number '{value}': expected format 99999-9")]
    InvalidFormat {
        /// The rejected value
        value: String,
    },

    /// Operation would break the overdraft-limit invariant
    ///
    /// Only special accounts may carry a positive limit.
    #[error("Invalid state for account {account}: {message}")]
    InvalidState {
        /// Account the operation targeted
        account: AccountId,
        /// What rule was violated
        message: String,
    },

    /// Amount is zero or negative
    #[error("Invalid amount {amount} for {operation}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Operation that received it
        operation: String,
    },

    /// Withdrawal exceeds balance plus limit
    ///
    /// The withdrawal is rejected and the account state remains unchanged.
    #[error(
        "Insufficient funds for account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Account ID
        account: AccountId,
        /// Balance plus limit at evaluation time
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Confirmation referenced a movement the account does not hold
    #[error("Movement {movement} not found in account {account}")]
    MovementNotFound {
        /// Account ID
        account: AccountId,
        /// Movement ID that was not found
        movement: MovementId,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account ID
        account: AccountId,
    },

    /// No account is registered under the given ID
    #[error("Account {account} not found")]
    AccountNotFound {
        /// Account ID
        account: AccountId,
    },

    /// An account is already registered under the given ID
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// Account ID
        account: AccountId,
    },

    /// Account cannot be closed because it has movements
    #[error("Account {account} has {movements} movement(s) and cannot be closed")]
    AccountHasMovements {
        /// Account ID
        account: AccountId,
        /// Number of movements in the history
        movements: usize,
    },

    /// Operation record lacks a field its type requires
    #[error("{operation} on account {account} requires a {field}")]
    MissingField {
        /// Operation type
        operation: String,
        /// Account ID
        account: AccountId,
        /// Name of the missing column
        field: String,
    },

    /// Unknown operation type in the input
    #[error("Invalid operation type '{op_type}' for account {account}")]
    InvalidOperationType {
        /// The unknown type string
        op_type: String,
        /// Account ID
        account: AccountId,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// The malformed record is skipped and replay continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidFormat error
    pub fn invalid_format(value: &str) -> Self {
        LedgerError::InvalidFormat {
            value: value.to_string(),
        }
    }

    /// Create an InvalidState error
    pub fn invalid_state(account: AccountId, message: &str) -> Self {
        LedgerError::InvalidState {
            account,
            message: message.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal, operation: &str) -> Self {
        LedgerError::InvalidAmount {
            amount,
            operation: operation.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            available,
            requested,
        }
    }

    /// Create a MovementNotFound error
    pub fn movement_not_found(account: AccountId, movement: MovementId) -> Self {
        LedgerError::MovementNotFound { account, movement }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountId) -> Self {
        LedgerError::DuplicateAccount { account }
    }

    /// Create an AccountHasMovements error
    pub fn account_has_movements(account: AccountId, movements: usize) -> Self {
        LedgerError::AccountHasMovements { account, movements }
    }

    /// Create a MissingField error
    pub fn missing_field(operation: &str, account: AccountId, field: &str) -> Self {
        LedgerError::MissingField {
            operation: operation.to_string(),
            account,
            field: field.to_string(),
        }
    }

    /// Create an InvalidOperationType error
    pub fn invalid_operation_type(op_type: &str, account: AccountId) -> Self {
        LedgerError::InvalidOperationType {
            op_type: op_type.to_string(),
            account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_format(
        LedgerError::InvalidFormat { value: "1234-5".to_string() },
        "Invalid account number '1234-5': expected format 99999-9"
    )]
    #[case::invalid_state(
        LedgerError::InvalidState { account: 3, message: "only special accounts may have a limit".to_string() },
        "Invalid state for account 3: only special accounts may have a limit"
    )]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: Decimal::new(-50, 1), operation: "withdraw".to_string() },
        "Invalid amount -5.0 for withdraw"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { account: 1, available: Decimal::new(5000, 4), requested: Decimal::new(10000, 4) },
        "Insufficient funds for account 1: available 0.5000, requested 1.0000"
    )]
    #[case::movement_not_found(
        LedgerError::MovementNotFound { account: 2, movement: 9 },
        "Movement 9 not found in account 2"
    )]
    #[case::account_has_movements(
        LedgerError::AccountHasMovements { account: 4, movements: 2 },
        "Account 4 has 2 movement(s) and cannot be closed"
    )]
    #[case::missing_field(
        LedgerError::MissingField { operation: "confirm".to_string(), account: 1, field: "movement".to_string() },
        "confirm on account 1 requires a movement"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds(1, Decimal::new(5000, 4), Decimal::new(10000, 4)),
        LedgerError::InsufficientFunds { account: 1, available: Decimal::new(5000, 4), requested: Decimal::new(10000, 4) }
    )]
    #[case::invalid_format(
        LedgerError::invalid_format("abc"),
        LedgerError::InvalidFormat { value: "abc".to_string() }
    )]
    #[case::duplicate_account(
        LedgerError::duplicate_account(7),
        LedgerError::DuplicateAccount { account: 7 }
    )]
    #[case::invalid_operation_type(
        LedgerError::invalid_operation_type("transfer", 1),
        LedgerError::InvalidOperationType { op_type: "transfer".to_string(), account: 1 }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
