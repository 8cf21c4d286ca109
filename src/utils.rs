use alloy::primitives::{Address, U256};
use chrono::{DateTime, Local, Utc};

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    let s = format!("{addr}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Format a base-unit token value as a whole-token decimal, keeping every
/// significant digit (the equivalent of `fromWei`).
pub fn format_units(value: U256, decimals: u8) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    // Past 10^77 the divisor no longer fits in 256 bits
    let Some(divisor) = U256::from(10u64).checked_pow(U256::from(decimals)) else {
        return format!("{value}");
    };
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return format!("{whole}");
    }

    let remainder_str = format!("{remainder}");
    let padded = format!("{:0>width$}", remainder_str, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Format a token amount with its symbol, e.g. "0.3 CELO"
pub fn format_token(value: U256, decimals: u8, symbol: &str) -> String {
    format!("{} {symbol}", format_units(value, decimals))
}

/// Format a Unix timestamp as a UTC datetime string
pub fn format_timestamp(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%b %d, %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Format a Unix timestamp in the local timezone, for the unlock column
pub fn format_local_time(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Time remaining until `unlock_time` as "in 2m 10s", or "unlocked" once reached.
pub fn format_countdown(unlock_time: u64, now: u64) -> String {
    if unlock_time <= now {
        return "unlocked".to_string();
    }
    let diff = unlock_time - now;
    if diff < 60 {
        format!("in {diff}s")
    } else if diff < 3600 {
        format!("in {}m {}s", diff / 60, diff % 60)
    } else if diff < 86400 {
        format!("in {}h {}m", diff / 3600, (diff % 3600) / 60)
    } else {
        format!("in {}d {}h", diff / 86400, (diff % 86400) / 3600)
    }
}

/// Current Unix time in seconds.
pub fn now_unix() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Render a boolean lock flag the way the lock table shows it.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
