use std::fs;
use std::io::Write;

use serde::Serialize;

use crate::data::types::{LockRecord, TokenInfo};
use crate::utils;

/// One CSV row per lock, amounts in both base units and whole tokens.
#[derive(Debug, Serialize)]
struct LockRow {
    id: String,
    token: String,
    withdrawer: String,
    amount_raw: String,
    amount: String,
    unlock_time: u64,
    unlock_time_utc: String,
    withdrawn: bool,
    deposited: bool,
}

impl LockRow {
    fn new(lock: &LockRecord, decimals: u8) -> Self {
        Self {
            id: lock.id.to_string(),
            token: format!("{:#x}", lock.token),
            withdrawer: format!("{:#x}", lock.withdrawer),
            amount_raw: lock.amount.to_string(),
            amount: utils::format_units(lock.amount, decimals),
            unlock_time: lock.unlock_time,
            unlock_time_utc: utils::format_timestamp(lock.unlock_time),
            withdrawn: lock.withdrawn,
            deposited: lock.deposited,
        }
    }
}

/// Export the lock list to CSV format.
///
/// Columns: id, token, withdrawer, amount_raw, amount, unlock_time, unlock_time_utc, withdrawn, deposited
pub fn export_locks_csv(locks: &[LockRecord], token: &TokenInfo, path: &str) -> Result<String, String> {
    let file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    let mut wtr = csv::Writer::from_writer(file);

    if locks.is_empty() {
        // serialize() only emits the header alongside the first record
        wtr.write_record([
            "id",
            "token",
            "withdrawer",
            "amount_raw",
            "amount",
            "unlock_time",
            "unlock_time_utc",
            "withdrawn",
            "deposited",
        ])
        .map_err(|e| format!("Failed to write CSV header: {e}"))?;
    }

    for lock in locks {
        wtr.serialize(LockRow::new(lock, token.decimals))
            .map_err(|e| format!("Failed to write CSV row: {e}"))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {e}"))?;

    Ok(format!("Exported {} locks to {path}", locks.len()))
}

/// Export the lock list to JSON format.
pub fn export_locks_json(locks: &[LockRecord], token: &TokenInfo, path: &str) -> Result<String, String> {
    let json = serde_json::json!({
        "token": format!("{:#x}", token.address),
        "symbol": token.symbol,
        "decimals": token.decimals,
        "locks": locks
            .iter()
            .map(|lock| LockRow::new(lock, token.decimals))
            .collect::<Vec<_>>(),
    });

    let formatted = serde_json::to_string_pretty(&json)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;

    let mut file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    file.write_all(formatted.as_bytes())
        .map_err(|e| format!("Failed to write file: {e}"))?;

    Ok(format!("Exported {} locks to {path}", locks.len()))
}

/// File name for an export taken at `unix_time`, e.g. `vault-locks-1700000000.csv`.
pub fn export_file_name(unix_time: i64, extension: &str) -> String {
    format!("vault-locks-{unix_time}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use std::fs;

    fn token() -> TokenInfo {
        TokenInfo {
            address: Address::repeat_byte(0xaa),
            symbol: "CELO".to_string(),
            decimals: 18,
        }
    }

    fn sample_locks() -> Vec<LockRecord> {
        vec![
            LockRecord {
                id: U256::from(7u64),
                token: Address::repeat_byte(0xaa),
                withdrawer: Address::repeat_byte(0xbb),
                amount: U256::from(300_000_000_000_000_000u64),
                unlock_time: 1700000060,
                withdrawn: false,
                deposited: true,
            },
            LockRecord {
                id: U256::from(6u64),
                token: Address::repeat_byte(0xaa),
                withdrawer: Address::repeat_byte(0xbb),
                amount: U256::from(2_000_000_000_000_000_000u64),
                unlock_time: 1700000000,
                withdrawn: true,
                deposited: true,
            },
        ]
    }

    #[test]
    fn test_export_locks_csv() {
        let path = "/tmp/vault-tui-test-locks.csv";
        let result = export_locks_csv(&sample_locks(), &token(), path);
        assert!(result.is_ok());

        let contents = fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("id,token,withdrawer,amount_raw,amount"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("7,"));
        assert!(first.contains("300000000000000000,0.3,1700000060"));
        assert!(lines.next().unwrap().ends_with("true,true"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_locks_csv_empty() {
        let path = "/tmp/vault-tui-test-locks-empty.csv";
        let result = export_locks_csv(&[], &token(), path);
        assert!(result.unwrap().contains("0 locks"));

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("id,"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_locks_json() {
        let path = "/tmp/vault-tui-test-locks.json";
        let result = export_locks_json(&sample_locks(), &token(), path);
        assert!(result.unwrap().contains("2 locks"));

        let contents = fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["symbol"], "CELO");
        assert_eq!(value["locks"][0]["id"], "7");
        assert_eq!(value["locks"][1]["withdrawn"], true);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(1700000000, "csv"), "vault-locks-1700000000.csv");
    }
}
