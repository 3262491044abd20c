//! Account-related types for the account ledger
//!
//! This module defines the account identifier, the validated account number
//! and the plain-data snapshot used to report account state.

use super::error::LedgerError;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Account identifier
///
/// Assigned externally when the account is opened and never changed.
pub type AccountId = u32;

/// Five ASCII digits, a hyphen and one check digit
static ACCOUNT_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}-[0-9]$").expect("Invalid account number regex pattern")
});

/// Account number in the `99999-9` format
///
/// The only way to build one is through [`AccountNumber::parse`] (or
/// `FromStr`), so holding an `AccountNumber` proves the value is well formed.
/// The check digit is carried but not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Validate and wrap an account number
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidFormat` if `value` does not match `99999-9`.
    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        if ACCOUNT_NUMBER_PATTERN.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(LedgerError::invalid_format(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digit after the hyphen
    pub fn check_digit(&self) -> char {
        // Validated format guarantees a trailing ASCII digit
        self.0.chars().last().unwrap_or('0')
    }
}

impl FromStr for AccountNumber {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time copy of an account's state
///
/// Every field is read under the same lock, so a snapshot never mixes values
/// from before and after a concurrent update.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    /// The account ID
    pub id: AccountId,

    /// Account number, if one has been assigned
    pub number: Option<AccountNumber>,

    /// Savings account flag (accounts open as checking accounts)
    pub savings: bool,

    /// Special accounts may carry an overdraft limit
    pub special: bool,

    /// Sum of confirmed movements, excluding the limit
    pub balance: Decimal,

    /// Overdraft limit
    pub limit: Decimal,

    /// Number of movements in the history
    pub movements: usize,

    /// Number of movements still waiting for confirmation
    pub pending: usize,
}

impl AccountSnapshot {
    /// Balance plus limit: the amount the holder can still spend
    pub fn available(&self) -> Decimal {
        self.balance + self.limit
    }
}
