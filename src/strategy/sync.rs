//! Synchronous processing strategy
//!
//! Single-threaded replay: records are read one at a time with `SyncReader`
//! and applied in file order through the `LedgerEngine`.

use crate::core::LedgerEngine;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_report, ProcessingStrategy, ReportOptions};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use account_ledger::strategy::{ProcessingStrategy, ReportOptions, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ReportOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("operations.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    report: ReportOptions,
}

impl SyncProcessingStrategy {
    pub fn new(report: ReportOptions) -> Self {
        Self { report }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = LedgerEngine::new();
        let reader = SyncReader::new(input_path).map_err(|e| e.to_string())?;

        let mut applied = 0usize;
        let mut rejected = 0usize;
        for result in reader {
            match result {
                Ok(record) => {
                    let account = record.account;
                    let operation = record.op_type.as_str();
                    match engine.process(record) {
                        Ok(()) => applied += 1,
                        Err(e) => {
                            rejected += 1;
                            warn!(account, operation, error = %e, "operation rejected");
                        }
                    }
                }
                Err(e) => {
                    rejected += 1;
                    warn!(error = %e, "skipping record");
                }
            }
        }

        info!(applied, rejected, "replay finished");
        write_report(&engine, self.report, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(content: &str, report: ReportOptions) -> String {
        let file = create_temp_csv(content);
        let mut output = Vec::new();
        SyncProcessingStrategy::new(report)
            .process(file.path(), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sync_strategy_replays_in_order() {
        let output = run(
            "type,account,amount,movement\n\
             open,1\n\
             deposit_cash,1,100\n\
             withdraw,1,100\n\
             withdraw,1,100\n",
            ReportOptions::default(),
        );

        assert_eq!(
            output,
            "account,number,savings,special,balance,limit,available,movements,pending\n\
             1,,false,false,0.0000,0.0000,0.0000,2,0\n"
        );
    }

    #[test]
    fn test_sync_strategy_writes_statement() {
        let output = run(
            "type,account,amount,movement\n\
             open,1\n\
             deposit_check,1,40\n",
            ReportOptions { statement: true },
        );

        assert_eq!(
            output,
            "account,number,savings,special,balance,limit,available,movements,pending\n\
             1,,false,false,0.0000,0.0000,0.0000,1,1\n\
             \n\
             account,movement,kind,amount,confirmed\n\
             1,1,credit,40.0000,false\n"
        );
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::default();
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);

        assert_eq!(result.unwrap_err(), "File not found: nonexistent.csv");
        assert!(output.is_empty());
    }
}
