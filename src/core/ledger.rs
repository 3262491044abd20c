//! Account ledger
//!
//! This module provides the `Account` struct, the single owner of an account's
//! balance, overdraft limit and movement history. Every sanctioned mutation
//! goes through it.
//!
//! # Rules
//!
//! - The account number must match `99999-9`
//! - Only special accounts may carry a positive limit
//! - Deposits and withdrawals require a positive amount
//! - A withdrawal succeeds only if `amount <= balance + limit`
//! - Confirmed movements affect the balance; pending ones do not until confirmed
//! - A movement is confirmed at most once
//!
//! # Concurrency
//!
//! Each account owns one mutex guarding all of its mutable state. Every
//! read-then-write sequence (most importantly the withdrawal's funds check and
//! debit) runs inside a single critical section, so two concurrent withdrawals
//! of the full available amount cannot both succeed. Accounts never share a
//! lock with each other.
//!
//! `balance + limit` is kept representable at all times: any update that would
//! overflow it is rejected with `ArithmeticOverflow`.
//!
//! Closing is a state of the account itself, set under the same lock that
//! guards its movements. Handles held past a close see every mutation rejected
//! with `AccountNotFound`.

use crate::types::{
    AccountId, AccountNumber, AccountSnapshot, LedgerError, Movement, MovementId, MovementKind,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::debug;

/// A bank account and its movement ledger
///
/// `Account` is `Send + Sync`; share it across threads or tasks behind an
/// `Arc` and call its methods through `&self`.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    state: Mutex<LedgerState>,
}

/// Mutable part of an account, only reachable through the account's lock
#[derive(Debug, Default)]
struct LedgerState {
    number: Option<AccountNumber>,
    savings: bool,
    special: bool,
    balance: Decimal,
    limit: Decimal,
    movements: Vec<Movement>,
    closed: bool,
}

impl LedgerState {
    fn ensure_open(&self, account: AccountId) -> Result<(), LedgerError> {
        if self.closed {
            return Err(LedgerError::account_not_found(account));
        }
        Ok(())
    }

    /// Balance after applying `delta`, provided balance + limit stays representable
    fn balance_after(
        &self,
        account: AccountId,
        delta: Decimal,
        operation: &str,
    ) -> Result<Decimal, LedgerError> {
        let balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, account))?;

        balance
            .checked_add(self.limit)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, account))?;

        Ok(balance)
    }

    /// Append a movement, applying it to the balance if it is confirmed
    ///
    /// All checks run before the first write, so an error leaves the state untouched.
    fn append(
        &mut self,
        account: AccountId,
        kind: MovementKind,
        amount: Decimal,
        confirmed: bool,
        operation: &str,
    ) -> Result<MovementId, LedgerError> {
        self.ensure_open(account)?;
        let id = MovementId::try_from(self.movements.len() + 1)
            .map_err(|_| LedgerError::arithmetic_overflow(operation, account))?;

        let movement = Movement {
            id,
            account,
            kind,
            amount,
            confirmed,
        };

        if confirmed {
            self.balance = self.balance_after(account, movement.signed_amount(), operation)?;
        }
        self.movements.push(movement);

        Ok(id)
    }

    fn pending(&self) -> usize {
        self.movements.iter().filter(|m| !m.confirmed).count()
    }
}

fn ensure_positive(amount: Decimal, operation: &str) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount, operation));
    }
    Ok(())
}

impl Account {
    /// Create a checking account with zero balance, zero limit and no movements
    pub fn new(id: AccountId) -> Self {
        Account {
            id,
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Create an account with its special flag and overdraft limit set
    ///
    /// # Errors
    ///
    /// Same as [`Account::set_limit`]: a positive limit on a non-special
    /// account or a negative limit is rejected.
    pub fn with_limit(id: AccountId, special: bool, limit: Decimal) -> Result<Self, LedgerError> {
        let account = Account::new(id);
        account.state.lock().special = special;
        account.set_limit(limit)?;
        Ok(account)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn number(&self) -> Option<AccountNumber> {
        self.state.lock().number.clone()
    }

    /// Assign the account number
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if `value` does not match `99999-9`; the
    /// previously stored number, if any, is kept.
    pub fn set_number(&self, value: &str) -> Result<(), LedgerError> {
        let number = AccountNumber::parse(value)?;
        let mut state = self.state.lock();
        state.ensure_open(self.id)?;
        state.number = Some(number);
        Ok(())
    }

    pub fn is_savings(&self) -> bool {
        self.state.lock().savings
    }

    /// Mark the account as savings or checking
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account has been closed.
    pub fn set_savings(&self, savings: bool) -> Result<(), LedgerError> {
        let mut state = self.state.lock();
        state.ensure_open(self.id)?;
        state.savings = savings;
        Ok(())
    }

    pub fn is_special(&self) -> bool {
        self.state.lock().special
    }

    /// Mark the account as special or not
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when clearing the flag while a positive limit is set.
    pub fn set_special(&self, special: bool) -> Result<(), LedgerError> {
        let mut state = self.state.lock();
        state.ensure_open(self.id)?;
        if !special && state.limit > Decimal::ZERO {
            return Err(LedgerError::invalid_state(
                self.id,
                "cannot clear the special flag while a limit is set",
            ));
        }
        state.special = special;
        Ok(())
    }

    /// Current balance, excluding the limit
    pub fn balance(&self) -> Decimal {
        self.state.lock().balance
    }

    pub fn limit(&self) -> Decimal {
        self.state.lock().limit
    }

    /// Set the overdraft limit
    ///
    /// # Errors
    ///
    /// - `InvalidState` if `limit > 0` and the account is not special
    /// - `InvalidAmount` if `limit < 0`
    /// - `ArithmeticOverflow` if `balance + limit` would not be representable
    pub fn set_limit(&self, limit: Decimal) -> Result<(), LedgerError> {
        if limit < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(limit, "set_limit"));
        }

        let mut state = self.state.lock();
        state.ensure_open(self.id)?;
        if limit > Decimal::ZERO && !state.special {
            return Err(LedgerError::invalid_state(
                self.id,
                "only special accounts may have a limit",
            ));
        }

        state
            .balance
            .checked_add(limit)
            .ok_or_else(|| LedgerError::arithmetic_overflow("set_limit", self.id))?;

        state.limit = limit;
        debug!(account = self.id, %limit, "limit updated");
        Ok(())
    }

    /// Balance plus limit, read from a single consistent state
    pub fn total_available(&self) -> Decimal {
        let state = self.state.lock();
        state.balance + state.limit
    }

    /// Append a movement to the history
    ///
    /// A confirmed movement is applied to the balance immediately (credits
    /// add, debits subtract). An unconfirmed one leaves the balance untouched
    /// until [`Account::confirm_movement`] is called for it.
    ///
    /// No funds check is made here; withdrawals go through [`Account::withdraw`].
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if applying the amount would overflow
    pub fn record_movement(
        &self,
        kind: MovementKind,
        amount: Decimal,
        confirmed: bool,
    ) -> Result<MovementId, LedgerError> {
        ensure_positive(amount, "record_movement")?;

        let id = self
            .state
            .lock()
            .append(self.id, kind, amount, confirmed, "record_movement")?;

        debug!(account = self.id, movement = id, kind = kind.as_str(), %amount, confirmed, "movement recorded");
        Ok(id)
    }

    /// Confirm a pending movement and apply it to the balance
    ///
    /// The check, the balance update and the flag flip happen under the
    /// account lock, so the amount is applied exactly once no matter how many
    /// times confirmation is requested.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The movement was pending and is now applied
    /// * `Ok(false)` - The movement was already confirmed; nothing changed
    ///
    /// # Errors
    ///
    /// - `MovementNotFound` if the account has no movement with this ID
    /// - `ArithmeticOverflow` if applying the amount would overflow
    pub fn confirm_movement(&self, movement: MovementId) -> Result<bool, LedgerError> {
        let mut state = self.state.lock();
        state.ensure_open(self.id)?;

        let index = (movement as usize)
            .checked_sub(1)
            .filter(|&i| i < state.movements.len())
            .ok_or_else(|| LedgerError::movement_not_found(self.id, movement))?;

        if state.movements[index].confirmed {
            return Ok(false);
        }

        let delta = state.movements[index].signed_amount();
        state.balance = state.balance_after(self.id, delta, "confirm_movement")?;
        state.movements[index].confirmed = true;

        debug!(account = self.id, movement, "movement confirmed");
        Ok(true)
    }

    /// Deposit cash, confirmed on the spot
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if the balance would overflow
    pub fn deposit_cash(&self, amount: Decimal) -> Result<MovementId, LedgerError> {
        ensure_positive(amount, "deposit_cash")?;

        let id = self
            .state
            .lock()
            .append(self.id, MovementKind::Credit, amount, true, "deposit_cash")?;

        debug!(account = self.id, movement = id, %amount, "cash deposited");
        Ok(id)
    }

    /// Deposit a check, pending until the clearing workflow confirms it
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount <= 0`.
    pub fn deposit_check(&self, amount: Decimal) -> Result<MovementId, LedgerError> {
        ensure_positive(amount, "deposit_check")?;

        let id = self
            .state
            .lock()
            .append(self.id, MovementKind::Credit, amount, false, "deposit_check")?;

        debug!(account = self.id, movement = id, %amount, "check deposited");
        Ok(id)
    }

    /// Withdraw funds, allowing the balance to go down to `-limit`
    ///
    /// The funds check and the debit happen in one critical section.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount > balance + limit`
    pub fn withdraw(&self, amount: Decimal) -> Result<MovementId, LedgerError> {
        ensure_positive(amount, "withdraw")?;

        let mut state = self.state.lock();
        state.ensure_open(self.id)?;
        let available = state.balance + state.limit;
        if amount > available {
            return Err(LedgerError::insufficient_funds(self.id, available, amount));
        }

        let id = state.append(self.id, MovementKind::Debit, amount, true, "withdraw")?;
        drop(state);

        debug!(account = self.id, movement = id, %amount, "withdrawal applied");
        Ok(id)
    }

    /// Copy of the movement history in append order
    pub fn movements(&self) -> Vec<Movement> {
        self.state.lock().movements.clone()
    }

    pub fn movement(&self, movement: MovementId) -> Option<Movement> {
        let state = self.state.lock();
        (movement as usize)
            .checked_sub(1)
            .and_then(|i| state.movements.get(i))
            .cloned()
    }

    /// Whether any movement was ever recorded
    ///
    /// Lifecycle managers use this to refuse deleting accounts with history.
    pub fn has_movements(&self) -> bool {
        !self.state.lock().movements.is_empty()
    }

    pub fn movement_count(&self) -> usize {
        self.state.lock().movements.len()
    }

    /// Close the account if it has never had a movement
    ///
    /// The movement check and the transition happen under the account lock,
    /// so no movement can be recorded after a successful close. Returns
    /// whether the account is now closed by this call.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock();
        if state.closed || !state.movements.is_empty() {
            return false;
        }
        state.closed = true;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of movements waiting for confirmation
    pub fn pending_movements(&self) -> usize {
        self.state.lock().pending()
    }

    /// Consistent copy of every field
    pub fn snapshot(&self) -> AccountSnapshot {
        let state = self.state.lock();
        AccountSnapshot {
            id: self.id,
            number: state.number.clone(),
            savings: state.savings,
            special: state.special,
            balance: state.balance,
            limit: state.limit,
            movements: state.movements.len(),
            pending: state.pending(),
        }
    }
}
