use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;
use thiserror::Error;

/// Rejections of the lock amount / lock id fields, shown verbatim in the status bar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter an amount to lock")]
    EmptyAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount has more than {0} decimal places")]
    TooPrecise(u8),
    #[error("Amount must be greater than zero")]
    ZeroAmount,
    #[error("Enter a lock id to withdraw")]
    EmptyLockId,
    #[error("Invalid lock id: {0}")]
    InvalidLockId(String),
}

/// Convert a decimal token amount such as "0.3" into base units.
pub fn parse_amount(text: &str, decimals: u8) -> Result<U256, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::EmptyAmount);
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    let well_formed = !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(InputError::InvalidAmount(text.to_string()));
    }
    if fraction.len() > decimals as usize {
        return Err(InputError::TooPrecise(decimals));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };
    let value: U256 = parse_units(&normalized, decimals)
        .map_err(|e| InputError::InvalidAmount(format!("{text} ({e})")))?
        .into();
    if value.is_zero() {
        return Err(InputError::ZeroAmount);
    }
    Ok(value)
}

/// Parse the identifier of a lock as returned by `getVaultsByWithdrawer`.
pub fn parse_lock_id(text: &str) -> Result<U256, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::EmptyLockId);
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::InvalidLockId(text.to_string()));
    }
    text.parse::<U256>()
        .map_err(|_| InputError::InvalidLockId(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEI: u64 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_default_amount() {
        let value = parse_amount("0.3", 18).unwrap();
        assert_eq!(value, U256::from(WEI / 10 * 3));
    }

    #[test]
    fn test_parse_whole_amount() {
        assert_eq!(parse_amount("2", 18).unwrap(), U256::from(2 * WEI));
        assert_eq!(parse_amount(" 1.5 ", 6).unwrap(), U256::from(1_500_000u64));
    }

    #[test]
    fn test_parse_leading_and_trailing_dot() {
        assert_eq!(parse_amount(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(parse_amount("5.", 1).unwrap(), U256::from(50u64));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_amount("", 18), Err(InputError::EmptyAmount));
        assert_eq!(parse_amount("   ", 18), Err(InputError::EmptyAmount));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(parse_amount("abc", 18), Err(InputError::InvalidAmount(_))));
        assert!(matches!(parse_amount("-1", 18), Err(InputError::InvalidAmount(_))));
        assert!(matches!(parse_amount("1.2.3", 18), Err(InputError::InvalidAmount(_))));
        assert!(matches!(parse_amount(".", 18), Err(InputError::InvalidAmount(_))));
        assert!(matches!(parse_amount("1e18", 18), Err(InputError::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_rejects_zero() {
        assert_eq!(parse_amount("0", 18), Err(InputError::ZeroAmount));
        assert_eq!(parse_amount("0.000", 18), Err(InputError::ZeroAmount));
    }

    #[test]
    fn test_parse_rejects_extra_precision() {
        assert_eq!(parse_amount("0.1234567", 6), Err(InputError::TooPrecise(6)));
    }

    #[test]
    fn test_parse_lock_id() {
        assert_eq!(parse_lock_id("0").unwrap(), U256::ZERO);
        assert_eq!(parse_lock_id(" 42 ").unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_parse_lock_id_rejects() {
        assert_eq!(parse_lock_id(""), Err(InputError::EmptyLockId));
        assert!(matches!(parse_lock_id("-1"), Err(InputError::InvalidLockId(_))));
        assert!(matches!(parse_lock_id("0x10"), Err(InputError::InvalidLockId(_))));
        assert!(matches!(parse_lock_id("1.5"), Err(InputError::InvalidLockId(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(InputError::ZeroAmount.to_string(), "Amount must be greater than zero");
        assert_eq!(
            InputError::InvalidLockId("x".to_string()).to_string(),
            "Invalid lock id: x"
        );
    }
}
