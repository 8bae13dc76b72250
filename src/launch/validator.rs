use ethers::types::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::launch::ports::LaunchCall;
use crate::models::launch::{LaunchRequest, MAX_NAME_LEN, MAX_SYMBOL_LEN};
use crate::utils::units::{format_ether, parse_ether, parse_units, ETHER_DECIMALS};

/// One failed launch rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("token name is required")]
    EmptyName,
    #[error("token name must be at most {max} characters (got {len})")]
    NameTooLong { len: usize, max: usize },
    #[error("symbol is required")]
    EmptySymbol,
    #[error("symbol must be at most {max} characters (got {len})")]
    SymbolTooLong { len: usize, max: usize },
    #[error("total supply must be a positive number")]
    InvalidTotalSupply,
    #[error("liquidity percent must be between 0 (exclusive) and 100")]
    LiquidityPercentOutOfRange,
    #[error("liquidity percent must be a whole number")]
    LiquidityPercentNotWhole,
    #[error("ETH amount must be a number")]
    InvalidEthAmount,
    #[error("ETH amount is below the minimum of {minimum} ETH")]
    EthBelowMinimum { minimum: String },
}

/// Every rule a launch request broke, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.issues.contains(issue)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Checks a request against the static form rules and the dynamic
/// `min_eth_wei` threshold read from the launcher contract.
///
/// On success the request is already converted into the call payload, so
/// whatever passes validation is exactly what gets submitted.
pub fn validate(request: &LaunchRequest, min_eth_wei: U256) -> Result<LaunchCall, ValidationError> {
    let mut issues = Vec::new();

    let name = request.name.trim();
    if name.is_empty() {
        issues.push(ValidationIssue::EmptyName);
    }
    let name_len = request.name.chars().count();
    if name_len > MAX_NAME_LEN {
        issues.push(ValidationIssue::NameTooLong { len: name_len, max: MAX_NAME_LEN });
    }

    let symbol = request.symbol.trim();
    if symbol.is_empty() {
        issues.push(ValidationIssue::EmptySymbol);
    }
    let symbol_len = request.symbol.chars().count();
    if symbol_len > MAX_SYMBOL_LEN {
        issues.push(ValidationIssue::SymbolTooLong { len: symbol_len, max: MAX_SYMBOL_LEN });
    }

    let total_supply = match parse_units(&request.total_supply, ETHER_DECIMALS) {
        Ok(supply) if !supply.is_zero() => Some(supply),
        _ => {
            issues.push(ValidationIssue::InvalidTotalSupply);
            None
        }
    };

    let liquidity_percent = match Decimal::from_str(request.liquidity_percent.trim()) {
        Ok(pct) if pct > Decimal::ZERO && pct <= Decimal::ONE_HUNDRED => {
            if pct.fract().is_zero() {
                pct.trunc().to_u64().map(U256::from)
            } else {
                issues.push(ValidationIssue::LiquidityPercentNotWhole);
                None
            }
        }
        _ => {
            issues.push(ValidationIssue::LiquidityPercentOutOfRange);
            None
        }
    };

    let value = match parse_ether(&request.eth_amount) {
        Ok(wei) if wei >= min_eth_wei => Some(wei),
        Ok(_) => {
            issues.push(ValidationIssue::EthBelowMinimum { minimum: format_ether(min_eth_wei) });
            None
        }
        Err(_) => {
            issues.push(ValidationIssue::InvalidEthAmount);
            None
        }
    };

    match (total_supply, liquidity_percent, value) {
        (Some(total_supply), Some(liquidity_percent), Some(value)) if issues.is_empty() => Ok(LaunchCall {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            total_supply,
            liquidity_percent,
            value,
        }),
        _ => Err(ValidationError { issues }),
    }
}

/// Aggregate form check used to enable or disable the launch action.
pub fn is_valid(request: &LaunchRequest, min_eth_wei: U256) -> bool {
    validate(request, min_eth_wei).is_ok()
}
