//! Owner-only launcher operations and the input checks in front of them.

use async_trait::async_trait;
use ethers::types::{Address, TxHash, U256};
use std::str::FromStr;

use crate::errors::{LauncherError, Result};
use crate::utils::units::parse_ether;

#[async_trait]
pub trait AdminWriter: Send + Sync {
    async fn set_min_launch_eth(&self, min_wei: U256) -> Result<TxHash>;
    async fn emergency_withdraw(&self) -> Result<TxHash>;
    async fn emergency_withdraw_token(&self, token: Address) -> Result<TxHash>;
}

/// The admin surface is only shown to the contract owner. Addresses compare
/// by value, so checksum casing does not matter.
pub fn is_owner(account: Option<Address>, owner: Option<Address>) -> bool {
    match (account, owner) {
        (Some(account), Some(owner)) => account == owner,
        _ => false,
    }
}

/// A new minimum must be a positive ETH amount.
pub fn parse_min_launch_eth(input: &str) -> Result<U256> {
    let invalid = || LauncherError::InvalidInput("Please enter a valid ETH amount".to_string());
    let wei = parse_ether(input).map_err(|_| invalid())?;
    if wei.is_zero() {
        return Err(invalid());
    }
    Ok(wei)
}

/// Token to sweep: a 20-byte hex address with `0x` prefix.
pub fn parse_token_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    let invalid = || LauncherError::InvalidInput("Please enter a valid token address".to_string());
    let hex_part = trimmed.strip_prefix("0x").ok_or_else(invalid)?;
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Address::from_str(trimmed).map_err(|_| invalid())
}

/// Rejects the call unless `account` owns the launcher.
pub fn ensure_owner(account: Option<Address>, owner: Address) -> Result<()> {
    if is_owner(account, Some(owner)) {
        Ok(())
    } else {
        Err(LauncherError::Unauthorized(
            "admin operations are restricted to the launcher owner".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_check_ignores_checksum_casing() {
        let owner = Address::from_str("0xc1c77747448f7d86e9a911e70773fc9EE4504976").unwrap();
        let account = Address::from_str("0xC1C77747448F7D86E9A911E70773FC9EE4504976").unwrap();
        assert!(is_owner(Some(account), Some(owner)));
        assert!(!is_owner(None, Some(owner)));
        assert!(!is_owner(Some(account), None));
        assert!(!is_owner(Some(Address::zero()), Some(owner)));
    }

    #[test]
    fn ensure_owner_maps_to_unauthorized() {
        let owner = Address::from_low_u64_be(7);
        assert!(ensure_owner(Some(owner), owner).is_ok());
        assert!(matches!(
            ensure_owner(Some(Address::from_low_u64_be(8)), owner),
            Err(LauncherError::Unauthorized(_))
        ));
    }

    #[test]
    fn min_launch_eth_must_be_positive_number() {
        assert_eq!(parse_min_launch_eth("0.2").unwrap(), U256::exp10(17) * 2);
        for bad in ["", "0", "0.0", "-1", "abc"] {
            assert!(
                matches!(parse_min_launch_eth(bad), Err(LauncherError::InvalidInput(_))),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn token_address_must_be_well_formed() {
        let parsed = parse_token_address(" 0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa ").unwrap();
        assert_eq!(parsed, Address::repeat_byte(0xaa));
        for bad in [
            "",
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "0xaaaa",
            "0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz",
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        ] {
            assert!(parse_token_address(bad).is_err(), "input {bad:?}");
        }
    }
}
