//! Operation records replayed against the ledger
//!
//! An operation record is the domain form of one row of the replay input. The
//! CSV-level representation and its conversion live in `io::csv_format`.

use super::account::{AccountId, AccountNumber};
use super::movement::MovementId;
use rust_decimal::Decimal;

/// Operations the ledger engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Register a new account, optionally special and with an initial limit
    Open,

    /// Assign or replace the account number
    Number,

    /// Teller or ATM cash deposit, confirmed immediately
    DepositCash,

    /// Check deposit, pending until confirmed
    DepositCheck,

    /// Withdrawal against balance plus limit
    Withdraw,

    /// Confirm a pending movement by its ID
    Confirm,

    /// Change the overdraft limit
    SetLimit,

    /// Remove an account that has no movements
    Close,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Open => "open",
            OperationType::Number => "number",
            OperationType::DepositCash => "deposit_cash",
            OperationType::DepositCheck => "deposit_check",
            OperationType::Withdraw => "withdraw",
            OperationType::Confirm => "confirm",
            OperationType::SetLimit => "set_limit",
            OperationType::Close => "close",
        }
    }
}

/// One ledger operation
///
/// Optional fields are only meaningful for some operation types; the engine
/// reports `MissingField` when a required one is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// What to do
    pub op_type: OperationType,

    /// Target account
    pub account: AccountId,

    /// Amount for deposits, withdrawals and limits
    pub amount: Option<Decimal>,

    /// Movement to confirm
    pub movement: Option<MovementId>,

    /// Account number for `open` and `number`
    pub number: Option<AccountNumber>,

    /// Special flag for `open`
    pub special: Option<bool>,
}

impl OperationRecord {
    /// Build a record with only the type and account set
    pub fn new(op_type: OperationType, account: AccountId) -> Self {
        Self {
            op_type,
            account,
            amount: None,
            movement: None,
            number: None,
            special: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_movement(mut self, movement: MovementId) -> Self {
        self.movement = Some(movement);
        self
    }

    pub fn with_number(mut self, number: AccountNumber) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_special(mut self, special: bool) -> Self {
        self.special = Some(special);
        self
    }
}
