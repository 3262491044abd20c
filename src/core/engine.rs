//! Ledger operation engine
//!
//! This module provides the `LedgerEngine` that routes operation records to
//! the `AccountRegistry` (open/close) and to the target `Account` (everything
//! else).
//!
//! The engine enforces record-level rules:
//! - Operations other than `open` require the account to be open
//! - Each operation type requires its fields (amount, movement, number)
//!
//! Ledger rules (formats, limits, funds, confirmation) are enforced by the
//! account itself. The engine holds no per-account state and works through
//! `&self`, so one engine can be shared by many threads or tasks.

use crate::core::ledger::Account;
use crate::core::registry::AccountRegistry;
use crate::core::traits::MovementConfirmation;
use crate::types::{AccountSnapshot, LedgerError, Movement, OperationRecord, OperationType};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Ledger operation engine
#[derive(Debug, Clone, Default)]
pub struct LedgerEngine {
    registry: Arc<AccountRegistry>,
}

impl LedgerEngine {
    /// Create an engine with an empty registry
    pub fn new() -> Self {
        Self::with_registry(Arc::new(AccountRegistry::new()))
    }

    /// Create an engine over an existing registry
    pub fn with_registry(registry: Arc<AccountRegistry>) -> Self {
        LedgerEngine { registry }
    }

    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    /// Process a single operation record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required field is missing (`MissingField`)
    /// - The account is not open, or already open for `open`
    /// - The ledger rejects the operation (format, limit, amount, funds, movement)
    pub fn process(&self, record: OperationRecord) -> Result<(), LedgerError> {
        match record.op_type {
            OperationType::Open => self.process_open(record),
            OperationType::Close => self.registry.close(record.account),
            OperationType::Number => {
                let number = required(record.number.as_ref(), &record, "number")?;
                self.account(&record)?.set_number(number.as_str())
            }
            OperationType::DepositCash => {
                let amount = required(record.amount, &record, "amount")?;
                self.account(&record)?.deposit_cash(amount).map(|_| ())
            }
            OperationType::DepositCheck => {
                let amount = required(record.amount, &record, "amount")?;
                self.account(&record)?.deposit_check(amount).map(|_| ())
            }
            OperationType::Withdraw => {
                let amount = required(record.amount, &record, "amount")?;
                self.account(&record)?.withdraw(amount).map(|_| ())
            }
            OperationType::Confirm => {
                let movement = required(record.movement, &record, "movement")?;
                let account = self.account(&record)?;
                MovementConfirmation::confirm_movement(&*account, movement).map(|_| ())
            }
            OperationType::SetLimit => {
                let limit = required(record.amount, &record, "amount")?;
                self.account(&record)?.set_limit(limit)
            }
        }
    }

    /// Open an account, then assign its number if the record carries one
    fn process_open(&self, record: OperationRecord) -> Result<(), LedgerError> {
        let account = self.registry.open(
            record.account,
            record.special.unwrap_or(false),
            record.amount.unwrap_or(Decimal::ZERO),
        )?;

        if let Some(number) = &record.number {
            account.set_number(number.as_str())?;
        }

        Ok(())
    }

    fn account(&self, record: &OperationRecord) -> Result<Arc<Account>, LedgerError> {
        self.registry.get(record.account)
    }

    /// Snapshots of all open accounts, sorted by ID
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        self.registry.snapshots()
    }

    /// Every movement of every open account, by account ID then movement ID
    pub fn statement(&self) -> Vec<Movement> {
        self.registry
            .handles()
            .iter()
            .flat_map(|account| account.movements())
            .collect()
    }
}

fn required<T>(
    value: Option<T>,
    record: &OperationRecord,
    field: &str,
) -> Result<T, LedgerError> {
    value.ok_or_else(|| {
        LedgerError::missing_field(record.op_type.as_str(), record.account, field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountNumber, MovementKind};
    use rstest::rstest;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn open(account: u32) -> OperationRecord {
        OperationRecord::new(OperationType::Open, account)
    }

    fn op(op_type: OperationType, account: u32, amount: i64) -> OperationRecord {
        OperationRecord::new(op_type, account).with_amount(dec(amount))
    }

    fn confirm(account: u32, movement: u32) -> OperationRecord {
        OperationRecord::new(OperationType::Confirm, account).with_movement(movement)
    }

    #[test]
    fn test_open_creates_checking_account() {
        let engine = LedgerEngine::new();

        engine.process(open(1)).unwrap();

        let snapshots = engine.snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, 1);
        assert!(!snapshots[0].savings);
        assert!(!snapshots[0].special);
        assert_eq!(snapshots[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_open_with_number_special_and_limit() {
        let engine = LedgerEngine::new();
        let record = open(1)
            .with_number(AccountNumber::parse("12345-6").unwrap())
            .with_special(true)
            .with_amount(dec(200));

        engine.process(record).unwrap();

        let snapshot = &engine.snapshots()[0];
        assert_eq!(snapshot.number.as_ref().unwrap().as_str(), "12345-6");
        assert!(snapshot.special);
        assert_eq!(snapshot.limit, dec(200));
    }

    #[test]
    fn test_open_non_special_with_limit_fails() {
        let engine = LedgerEngine::new();

        let result = engine.process(open(1).with_amount(dec(10)));

        assert!(matches!(result, Err(LedgerError::InvalidState { .. })));
        assert!(engine.snapshots().is_empty());
    }

    #[test]
    fn test_operation_on_unopened_account_fails() {
        let engine = LedgerEngine::new();

        let result = engine.process(op(OperationType::DepositCash, 9, 10));

        assert_eq!(result, Err(LedgerError::account_not_found(9)));
    }

    #[rstest]
    #[case::deposit_cash(OperationRecord::new(OperationType::DepositCash, 1), "amount")]
    #[case::deposit_check(OperationRecord::new(OperationType::DepositCheck, 1), "amount")]
    #[case::withdraw(OperationRecord::new(OperationType::Withdraw, 1), "amount")]
    #[case::set_limit(OperationRecord::new(OperationType::SetLimit, 1), "amount")]
    #[case::confirm(OperationRecord::new(OperationType::Confirm, 1), "movement")]
    #[case::number(OperationRecord::new(OperationType::Number, 1), "number")]
    fn test_missing_fields(#[case] record: OperationRecord, #[case] field: &str) {
        let engine = LedgerEngine::new();
        engine.process(open(1)).unwrap();
        let operation = record.op_type.as_str();

        let result = engine.process(record);

        assert_eq!(result, Err(LedgerError::missing_field(operation, 1, field)));
    }

    #[test]
    fn test_deposit_withdraw_flow() {
        let engine = LedgerEngine::new();
        engine.process(open(1)).unwrap();

        engine.process(op(OperationType::DepositCash, 1, 100)).unwrap();
        engine.process(op(OperationType::Withdraw, 1, 40)).unwrap();
        let result = engine.process(op(OperationType::Withdraw, 1, 61));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(engine.snapshots()[0].balance, dec(60));
    }

    #[test]
    fn test_check_confirmation_flow() {
        let engine = LedgerEngine::new();
        engine.process(open(1)).unwrap();

        engine.process(op(OperationType::DepositCheck, 1, 50)).unwrap();
        assert_eq!(engine.snapshots()[0].balance, Decimal::ZERO);
        assert_eq!(engine.snapshots()[0].pending, 1);

        engine.process(confirm(1, 1)).unwrap();
        engine.process(confirm(1, 1)).unwrap();

        assert_eq!(engine.snapshots()[0].balance, dec(50));
        assert_eq!(engine.snapshots()[0].pending, 0);
        assert_eq!(
            engine.process(confirm(1, 2)),
            Err(LedgerError::movement_not_found(1, 2))
        );
    }

    #[test]
    fn test_set_limit_requires_special_account() {
        let engine = LedgerEngine::new();
        engine.process(open(1)).unwrap();
        engine.process(open(2).with_special(true)).unwrap();

        let regular = engine.process(op(OperationType::SetLimit, 1, 10));
        engine.process(op(OperationType::SetLimit, 2, 10)).unwrap();

        assert!(matches!(regular, Err(LedgerError::InvalidState { .. })));
        let snapshots = engine.snapshots();
        assert_eq!(snapshots[0].limit, Decimal::ZERO);
        assert_eq!(snapshots[1].limit, dec(10));
    }

    #[test]
    fn test_number_operation() {
        let engine = LedgerEngine::new();
        engine.process(open(1)).unwrap();
        let record = OperationRecord::new(OperationType::Number, 1)
            .with_number(AccountNumber::parse("00001-9").unwrap());

        engine.process(record).unwrap();

        assert_eq!(
            engine.snapshots()[0].number.as_ref().map(AccountNumber::as_str),
            Some("00001-9")
        );
    }

    #[test]
    fn test_close_rules() {
        let engine = LedgerEngine::new();
        engine.process(open(1)).unwrap();
        engine.process(open(2)).unwrap();
        engine.process(op(OperationType::DepositCash, 2, 5)).unwrap();

        engine
            .process(OperationRecord::new(OperationType::Close, 1))
            .unwrap();
        let result = engine.process(OperationRecord::new(OperationType::Close, 2));

        assert_eq!(result, Err(LedgerError::account_has_movements(2, 1)));
        let ids: Vec<u32> = engine.snapshots().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_statement_orders_by_account_then_movement() {
        let engine = LedgerEngine::new();
        engine.process(open(2)).unwrap();
        engine.process(open(1)).unwrap();
        engine.process(op(OperationType::DepositCash, 2, 5)).unwrap();
        engine.process(op(OperationType::DepositCheck, 1, 7)).unwrap();
        engine.process(op(OperationType::Withdraw, 2, 3)).unwrap();

        let statement = engine.statement();

        let keys: Vec<(u32, u32, MovementKind)> = statement
            .iter()
            .map(|m| (m.account, m.id, m.kind))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, 1, MovementKind::Credit),
                (2, 1, MovementKind::Credit),
                (2, 2, MovementKind::Debit),
            ]
        );
    }
}
