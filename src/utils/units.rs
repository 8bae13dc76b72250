use ethers::types::U256;
use thiserror::Error;

/// Decimals used by the launcher contract for both ETH values and token supply.
pub const ETHER_DECIMALS: u32 = 18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("empty amount")]
    Empty,
    #[error("'{0}' is not a decimal number")]
    NotNumeric(String),
    #[error("'{0}' is negative")]
    Negative(String),
    #[error("'{input}' has more than {decimals} fractional digits")]
    TooPrecise { input: String, decimals: u32 },
    #[error("'{0}' does not fit in 256 bits")]
    Overflow(String),
}

/// Converts a decimal string into a fixed-point integer scaled by `10^decimals`.
///
/// Accepts `123`, `0.5`, `.5` and `5.`. Rejects signs, exponents, separators
/// and any fractional digits beyond `decimals` rather than truncating them.
pub fn parse_units(input: &str, decimals: u32) -> Result<U256, UnitsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(UnitsError::Negative(trimmed.to_string()));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::NotNumeric(trimmed.to_string()));
    }
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooPrecise { input: trimmed.to_string(), decimals });
    }

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    digits.push_str(fraction);
    for _ in fraction.len()..decimals as usize {
        digits.push('0');
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits).map_err(|_| UnitsError::Overflow(trimmed.to_string()))
}

/// Shorthand for [`parse_units`] with 18 decimals.
pub fn parse_ether(input: &str) -> Result<U256, UnitsError> {
    parse_units(input, ETHER_DECIMALS)
}

/// Formats a fixed-point integer back into a decimal string, trimming
/// trailing zeros of the fractional part.
pub fn format_units(amount: U256, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let divisor = U256::exp10(decimals as usize);
    let whole_part = amount / divisor;
    let fractional_part = amount % divisor;

    if fractional_part.is_zero() {
        return whole_part.to_string();
    }

    let fractional_str = format!("{:0>width$}", fractional_part.to_string(), width = decimals as usize);
    let trimmed = fractional_str.trim_end_matches('0');

    format!("{}.{}", whole_part, trimmed)
}

pub fn format_ether(amount: U256) -> String {
    format_units(amount, ETHER_DECIMALS)
}
