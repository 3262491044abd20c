//! Thread-safe account registry
//!
//! This module provides the `AccountRegistry` struct, an in-memory lifecycle
//! manager mapping account IDs to shared account handles.
//!
//! # Design
//!
//! The registry uses `DashMap` for fine-grained, sharded locking of the
//! ID → handle mapping. Lookups clone the `Arc<Account>` and release the shard
//! before any ledger operation runs, so ledger work is serialized only by the
//! account's own lock and operations on different accounts never wait on each
//! other.
//!
//! Closing an account is decided by the account under its own lock: accounts
//! with movements cannot be removed, and a closed account accepts no further
//! movements. Refusals report the count through [`MovementHistory`].

use crate::core::ledger::Account;
use crate::core::traits::MovementHistory;
use crate::types::{AccountId, AccountSnapshot, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Concurrent registry of open accounts
#[derive(Debug, Default)]
pub struct AccountRegistry {
    /// Open accounts by ID
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Open a new account
    ///
    /// # Arguments
    ///
    /// * `id` - The ID to register the account under
    /// * `special` - Whether the account may carry an overdraft limit
    /// * `limit` - Initial overdraft limit
    ///
    /// # Errors
    ///
    /// - `DuplicateAccount` if an account with this ID is already open
    /// - Any error from [`Account::with_limit`]; no account is registered then
    pub fn open(
        &self,
        id: AccountId,
        special: bool,
        limit: Decimal,
    ) -> Result<Arc<Account>, LedgerError> {
        match self.accounts.entry(id) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_account(id)),
            Entry::Vacant(entry) => {
                let account = Arc::new(Account::with_limit(id, special, limit)?);
                entry.insert(Arc::clone(&account));
                debug!(account = id, special, %limit, "account opened");
                Ok(account)
            }
        }
    }

    /// Shared handle to an open account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account is registered under `id`.
    pub fn get(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.accounts
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.contains_key(&id)
    }

    /// Close an account that has no movements
    ///
    /// The account is marked closed under its own lock, in the same critical
    /// section as the movement check, and removed while the shard lock is held.
    /// Handles obtained earlier through [`AccountRegistry::get`] stay readable,
    /// but every mutation through them fails with `AccountNotFound`.
    ///
    /// # Errors
    ///
    /// - `AccountHasMovements` if the account has any movement
    /// - `AccountNotFound` if no account is registered under `id`
    pub fn close(&self, id: AccountId) -> Result<(), LedgerError> {
        if self
            .accounts
            .remove_if(&id, |_, account| account.close() || account.is_closed())
            .is_some()
        {
            debug!(account = id, "account closed");
            return Ok(());
        }

        match self.accounts.get(&id) {
            Some(entry) => Err(LedgerError::account_has_movements(
                id,
                MovementHistory::movement_count(&**entry.value()),
            )),
            None => Err(LedgerError::account_not_found(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Snapshots of all open accounts, sorted by ID
    ///
    /// Each snapshot is internally consistent; accounts are read one at a time.
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        self.handles()
            .iter()
            .map(|account| account.snapshot())
            .collect()
    }

    /// Handles to all open accounts, sorted by ID
    pub fn handles(&self) -> Vec<Arc<Account>> {
        let mut handles: Vec<Arc<Account>> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        handles.sort_by_key(|account| account.id());
        handles
    }
}
