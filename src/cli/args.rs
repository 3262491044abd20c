use crate::strategy::{BatchConfig, ReportOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay account ledger operations and report the resulting accounts
#[derive(Parser, Debug)]
#[command(name = "account-ledger")]
#[command(about = "Replay account ledger operations and report account states", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy used to replay the operations
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of operation records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operation records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        visible_alias = "worker-threads",
        value_name = "COUNT",
        help = "Number of worker threads processing accounts concurrently (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Append the movement statement to the report
    #[arg(long = "statement", help = "Append every account's movements after the summary")]
    pub statement: bool,

    /// Log output format
    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Log format on stderr: 'text' or 'json' (filter with RUST_LOG)"
    )]
    pub log_format: LogFormat,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available log formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take their defaults; zero values fall back to the
    /// defaults with a logged warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_none() && self.worker_threads.is_none() {
            return BatchConfig::default();
        }

        let default = BatchConfig::default();
        BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size()),
            self.worker_threads.unwrap_or(default.worker_threads()),
        )
    }

    pub fn to_report_options(&self) -> ReportOptions {
        ReportOptions {
            statement: self.statement,
        }
    }
}
