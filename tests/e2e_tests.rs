//! End-to-end integration tests
//!
//! These tests validate the complete replay pipeline using predefined CSV
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Replays all operations through the ledger
//! 3. Generates the output CSV
//! 4. Compares actual output with expected.csv
//!
//! Fixtures are located in tests/fixtures/ and cover:
//! - Happy path scenarios
//! - Check deposits and (repeated) confirmation
//! - Overdraft limits on special accounts
//! - Error conditions (insufficient funds, malformed and rejected records)
//! - Account lifecycle (close with and without movements)
//! - Decimal precision and the movement statement
//!
//! Each fixture is run twice: once with the synchronous strategy and once with
//! the async strategy.

#[cfg(test)]
mod tests {
    use account_ledger::cli::StrategyType;
    use account_ledger::strategy::{create_strategy, BatchConfig, ReportOptions};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Run a fixture by replaying input.csv and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if the fixture files cannot be read or the output differs.
    fn run_test_fixture(
        fixture_name: &str,
        strategy_type: StrategyType,
        config: Option<BatchConfig>,
        report: ReportOptions,
    ) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let strategy = create_strategy(strategy_type, config, report);

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to replay operations: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("happy_path")]
    #[case("check_confirmation")]
    #[case("overdraft_limit")]
    #[case("insufficient_funds")]
    #[case("invalid_records")]
    #[case("close_rules")]
    #[case("precision")]
    #[case("multiple_accounts")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy, None, ReportOptions::default());
    }

    #[rstest]
    fn test_statement_fixture(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture("statement", strategy, None, ReportOptions { statement: true });
    }

    /// Batches of one record make every account's history span many batches
    #[rstest]
    #[case("check_confirmation")]
    #[case("close_rules")]
    #[case("multiple_accounts")]
    fn test_fixtures_with_tiny_batches(#[case] fixture: &str) {
        run_test_fixture(
            fixture,
            StrategyType::Async,
            Some(BatchConfig::new(1, 2)),
            ReportOptions::default(),
        );
    }

    #[rstest]
    fn test_missing_input_file_fails(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let strategy = create_strategy(strategy, None, ReportOptions::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("tests/fixtures/missing/input.csv"), &mut output);

        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
