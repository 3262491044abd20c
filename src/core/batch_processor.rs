//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which processes batches of
//! operation records concurrently across accounts while keeping each account's
//! records in file order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── LedgerEngine (cloneable, shares one AccountRegistry)
//! ```
//!
//! Each account's sub-batch runs on its own tokio task. Correctness does not
//! depend on the partitioning: the account lock serializes conflicting
//! operations regardless. Partitioning only preserves the replay order an
//! input file implies.

use std::collections::HashMap;

use crate::core::engine::LedgerEngine;
use crate::types::{AccountId, LedgerError, OperationRecord};
use tracing::{error, warn};

/// Result of processing a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation record that was processed
    pub record: OperationRecord,

    /// The result of processing (success or error)
    pub result: Result<(), LedgerError>,
}

/// Batch processor with account-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: LedgerEngine,
}

impl BatchProcessor {
    pub fn new(engine: LedgerEngine) -> Self {
        Self { engine }
    }

    /// Partition a batch of records by account ID
    ///
    /// # Guarantees
    ///
    /// - Each record appears in exactly one sub-batch
    /// - Records for each account keep their original order
    pub fn partition_by_account(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<AccountId, Vec<OperationRecord>> {
        let mut account_batches: HashMap<AccountId, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            account_batches
                .entry(record.account)
                .or_default()
                .push(record);
        }

        account_batches
    }

    /// Process all records for a single account sequentially
    ///
    /// Failed records are logged and captured; processing continues with the
    /// next record.
    pub async fn process_account_operations(
        &self,
        records: Vec<OperationRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let result = self.engine.process(record.clone());
            if let Err(e) = &result {
                warn!(
                    account = record.account,
                    operation = record.op_type.as_str(),
                    error = %e,
                    "operation rejected"
                );
            }
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch: partition by account, one task per account, wait for all
    ///
    /// Results may come back in a different order than the input.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let account_batches = self.partition_by_account(batch);

        let mut tasks = Vec::with_capacity(account_batches.len());
        for (_account, records) in account_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_account_operations(records).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => error!(error = %e, "account task failed"),
            }
        }

        results
    }
}
