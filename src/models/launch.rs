use chrono::{DateTime, Utc};
use ethers::types::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::launch::receipt::format_address;

pub const DEFAULT_TOTAL_SUPPLY: &str = "1000000000";
pub const DEFAULT_LIQUIDITY_PERCENT: &str = "20";
pub const DEFAULT_ETH_AMOUNT: &str = "0.1";

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;

/// User-editable launch form. Every field stays a string so half-typed input
/// can be held and re-validated on each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
    pub liquidity_percent: String,
    pub eth_amount: String,
}

impl Default for LaunchRequest {
    fn default() -> Self {
        LaunchRequest {
            name: String::new(),
            symbol: String::new(),
            total_supply: DEFAULT_TOTAL_SUPPLY.to_string(),
            liquidity_percent: DEFAULT_LIQUIDITY_PERCENT.to_string(),
            eth_amount: DEFAULT_ETH_AMOUNT.to_string(),
        }
    }
}

impl LaunchRequest {
    pub fn new(name: &str, symbol: &str) -> Self {
        let mut request = LaunchRequest {
            name: name.to_string(),
            ..Default::default()
        };
        request.set_symbol(symbol);
        request
    }

    /// Tickers are conventionally upper case; the setter normalises.
    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol = symbol.to_uppercase();
    }
}

/// Outcome of a launch whose receipt yielded a token address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResult {
    pub token_address: Address,
    pub transaction_hash: TxHash,
    pub name: String,
    pub symbol: String,
    pub launched_at: DateTime<Utc>,
}

impl LaunchResult {
    pub fn token_address_hex(&self) -> String {
        format_address(&self.token_address)
    }

    pub fn transaction_hash_hex(&self) -> String {
        format!("{:#x}", self.transaction_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_launch_form() {
        let request = LaunchRequest::default();
        assert_eq!(request.name, "");
        assert_eq!(request.symbol, "");
        assert_eq!(request.total_supply, "1000000000");
        assert_eq!(request.liquidity_percent, "20");
        assert_eq!(request.eth_amount, "0.1");
    }

    #[test]
    fn symbol_setter_uppercases() {
        let request = LaunchRequest::new("DogeMoon", "dogem");
        assert_eq!(request.symbol, "DOGEM");
        assert_eq!(request.name, "DogeMoon");
    }
}
