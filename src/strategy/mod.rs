//! Processing strategy module for ledger replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! encompassing both CSV parsing and ledger processing. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected
//! at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerEngine;
use crate::io::csv_format::{write_accounts_csv, write_statement_csv};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay operations from input file and write the report to output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    ///
    /// Individual operation errors are logged and do not cause this method to
    /// return an error. Processing continues with the next operation.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// What the final report contains
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Append the movement statement after the account summary
    pub statement: bool,
}

/// Write the account summary, and the statement if requested, separated by a blank line
pub fn write_report(
    engine: &LedgerEngine,
    options: ReportOptions,
    output: &mut dyn Write,
) -> Result<(), String> {
    write_accounts_csv(&engine.snapshots(), output)?;

    if options.statement {
        writeln!(output).map_err(|e| format!("Failed to write output: {}", e))?;
        write_statement_csv(&engine.statement(), output)?;
    }

    Ok(())
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    report: ReportOptions,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(report)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, report))
        }
    }
}
