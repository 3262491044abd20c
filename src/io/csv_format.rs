//! CSV format handling for operation records and ledger output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to operation records
//! - Account summary and movement statement serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{
    AccountId, AccountNumber, AccountSnapshot, LedgerError, Movement, OperationRecord,
    OperationType,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// `type, account, amount, movement, number, special`.
/// Every column after `account` is optional; trailing ones may be omitted.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub account: AccountId,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub movement: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub special: Option<String>,
}

/// Non-empty, trimmed value of an optional column
fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation type (case-insensitive)
/// - Parses amount, movement ID, account number and special flag when present
///
/// Whether a field is required for the operation type is decided by the
/// engine, so a `withdraw` without an amount converts successfully here and is
/// rejected later with `MissingField`.
///
/// # Returns
///
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, String> {
    let account = csv_record.account;

    let op_type = match csv_record.op_type.trim().to_lowercase().as_str() {
        "open" => OperationType::Open,
        "number" => OperationType::Number,
        "deposit_cash" => OperationType::DepositCash,
        "deposit_check" => OperationType::DepositCheck,
        "withdraw" => OperationType::Withdraw,
        "confirm" => OperationType::Confirm,
        "set_limit" => OperationType::SetLimit,
        "close" => OperationType::Close,
        _ => {
            return Err(LedgerError::invalid_operation_type(&csv_record.op_type, account).to_string())
        }
    };

    let mut record = OperationRecord::new(op_type, account);

    if let Some(amount) = present(&csv_record.amount) {
        let amount = Decimal::from_str(amount)
            .map_err(|_| format!("Invalid amount '{}' for account {}", amount, account))?;
        record = record.with_amount(amount);
    }

    if let Some(movement) = present(&csv_record.movement) {
        let movement = movement
            .parse()
            .map_err(|_| format!("Invalid movement '{}' for account {}", movement, account))?;
        record = record.with_movement(movement);
    }

    if let Some(number) = present(&csv_record.number) {
        let number = AccountNumber::parse(number).map_err(|e| e.to_string())?;
        record = record.with_number(number);
    }

    if let Some(special) = present(&csv_record.special) {
        let special = match special.to_lowercase().as_str() {
            "true" | "yes" | "1" => true,
            "false" | "no" | "0" => false,
            _ => {
                return Err(format!(
                    "Invalid special flag '{}' for account {}",
                    special, account
                ))
            }
        };
        record = record.with_special(special);
    }

    Ok(record)
}

/// Write account states to CSV format
///
/// Columns: account, number, savings, special, balance, limit, available,
/// movements, pending. Accounts are sorted by ID for deterministic output and
/// amounts are written with four decimal places.
pub fn write_accounts_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "account",
            "number",
            "savings",
            "special",
            "balance",
            "limit",
            "available",
            "movements",
            "pending",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id.to_string(),
                account
                    .number
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                account.savings.to_string(),
                account.special.to_string(),
                format!("{:.4}", account.balance),
                format!("{:.4}", account.limit),
                format!("{:.4}", account.available()),
                account.movements.to_string(),
                account.pending.to_string(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write the movement statement to CSV format
///
/// Columns: account, movement, kind, amount, confirmed. Movements are written
/// in the order given.
pub fn write_statement_csv(movements: &[Movement], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "movement", "kind", "amount", "confirmed"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for movement in movements {
        writer
            .write_record(&[
                movement.account.to_string(),
                movement.id.to_string(),
                movement.kind.as_str().to_string(),
                format!("{:.4}", movement.amount),
                movement.confirmed.to_string(),
            ])
            .map_err(|e| format!("Failed to write movement record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
