use ethers::types::{Address, U256};
use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::Result;
use crate::launch::fees::format_fee_amount;
use crate::launch::ports::LauncherReader;
use crate::launch::receipt::format_address;
use crate::utils::links::truncate_address;
use crate::utils::units::format_ether;

/// Recent-launch listings show at most this many tokens.
pub const RECENT_LAUNCH_LIMIT: usize = 6;

/// Snapshot of the launcher's read surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherStats {
    pub owner: Option<Address>,
    pub min_launch_eth: Option<U256>,
    pub total_launches: U256,
    pub total_fees_collected: U256,
    pub creator_launch_count: Option<U256>,
    pub launched_tokens: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentLaunch {
    /// 1-based position in launch order.
    pub number: usize,
    pub address: Address,
}

impl RecentLaunch {
    pub fn short_address(&self) -> String {
        truncate_address(&format_address(&self.address))
    }
}

impl LauncherStats {
    /// Reads everything the stats and recent-launch views show. The creator
    /// count is only fetched when an account is known. Individual read
    /// failures degrade to empty values, matching what a display shows
    /// before the first read lands.
    pub async fn fetch<R: LauncherReader + ?Sized>(reader: &R, account: Option<Address>) -> Result<Self> {
        let owner = reader.owner().await.map_err(|e| warn!("owner() read failed: {}", e)).ok();
        let min_launch_eth = reader
            .min_launch_eth()
            .await
            .map_err(|e| warn!("minLaunchEth() read failed: {}", e))
            .ok();
        let total_launches = reader.total_launches().await?;
        let total_fees_collected = reader.total_fees_collected().await?;
        let creator_launch_count = match account {
            Some(account) => reader
                .creator_launch_count(account)
                .await
                .map_err(|e| warn!("getCreatorLaunchCount() read failed: {}", e))
                .ok(),
            None => None,
        };
        let launched_tokens = reader.launched_tokens().await?;

        Ok(LauncherStats {
            owner,
            min_launch_eth,
            total_launches,
            total_fees_collected,
            creator_launch_count,
            launched_tokens,
        })
    }

    pub fn total_launches_display(&self) -> String {
        self.total_launches.to_string()
    }

    /// Size of the launched-token list, which is what the recent-launches
    /// view counts.
    pub fn launched_tokens_display(&self) -> String {
        self.launched_tokens.len().to_string()
    }

    /// Collected fees with four decimals, `0 ETH` when nothing was collected.
    pub fn fees_collected_display(&self) -> String {
        if self.total_fees_collected.is_zero() {
            return "0 ETH".to_string();
        }
        let formatted = format_ether(self.total_fees_collected);
        match Decimal::from_str(&formatted) {
            Ok(d) => format!("{} ETH", format_fee_amount(d)),
            Err(_) => format!("{} ETH", formatted),
        }
    }

    /// Current minimum, falling back to the 0.1 ETH default before the first read.
    pub fn min_launch_eth_display(&self) -> String {
        match self.min_launch_eth {
            Some(min) if !min.is_zero() => format!("{} ETH", format_ether(min)),
            _ => "0.1 ETH".to_string(),
        }
    }

    /// "You've launched N meme token(s)!" once the account has any launches.
    pub fn creator_message(&self) -> Option<String> {
        let count = self.creator_launch_count?;
        if count.is_zero() {
            return None;
        }
        let plural = if count > U256::one() { "s" } else { "" };
        Some(format!("You've launched {} meme token{}! 🚀", count, plural))
    }

    /// Newest first, capped at [`RECENT_LAUNCH_LIMIT`].
    pub fn recent_launches(&self) -> Vec<RecentLaunch> {
        let total = self.launched_tokens.len();
        self.launched_tokens
            .iter()
            .rev()
            .take(RECENT_LAUNCH_LIMIT)
            .enumerate()
            .map(|(index, address)| RecentLaunch { number: total - index, address: *address })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(n: u64) -> Vec<Address> {
        (1..=n).map(Address::from_low_u64_be).collect()
    }

    #[test]
    fn recent_launches_are_newest_first_and_capped() {
        let stats = LauncherStats { launched_tokens: tokens(8), ..Default::default() };
        let recent = stats.recent_launches();
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0], RecentLaunch { number: 8, address: Address::from_low_u64_be(8) });
        assert_eq!(recent[5], RecentLaunch { number: 3, address: Address::from_low_u64_be(3) });
    }

    #[test]
    fn recent_total_counts_the_token_list() {
        let stats = LauncherStats {
            total_launches: U256::from(12u64),
            launched_tokens: tokens(8),
            ..Default::default()
        };
        assert_eq!(stats.launched_tokens_display(), "8");
        assert_eq!(LauncherStats::default().launched_tokens_display(), "0");
    }

    #[test]
    fn recent_launches_empty_when_none() {
        assert!(LauncherStats::default().recent_launches().is_empty());
    }

    #[test]
    fn short_address_keeps_prefix_and_suffix() {
        let launch = RecentLaunch { number: 1, address: Address::repeat_byte(0xab) };
        assert_eq!(launch.short_address(), "0xabab...abab");
    }

    #[test]
    fn fee_and_minimum_formatting() {
        let stats = LauncherStats {
            total_fees_collected: U256::exp10(15) * 3, // 0.003 ETH
            min_launch_eth: Some(U256::exp10(17) * 2),
            ..Default::default()
        };
        assert_eq!(stats.fees_collected_display(), "0.0030 ETH");
        assert_eq!(stats.min_launch_eth_display(), "0.2 ETH");
        assert_eq!(LauncherStats::default().fees_collected_display(), "0 ETH");
        assert_eq!(LauncherStats::default().min_launch_eth_display(), "0.1 ETH");
    }

    #[test]
    fn collected_fees_round_to_four_places() {
        // 0.00999 ETH
        let stats = LauncherStats { total_fees_collected: U256::exp10(13) * 999, ..Default::default() };
        assert_eq!(stats.fees_collected_display(), "0.0100 ETH");
        // 0.00004 ETH
        let stats = LauncherStats { total_fees_collected: U256::exp10(13) * 4, ..Default::default() };
        assert_eq!(stats.fees_collected_display(), "0.0000 ETH");
    }

    #[test]
    fn creator_message_pluralises() {
        let mut stats = LauncherStats::default();
        assert_eq!(stats.creator_message(), None);
        stats.creator_launch_count = Some(U256::zero());
        assert_eq!(stats.creator_message(), None);
        stats.creator_launch_count = Some(U256::one());
        assert_eq!(stats.creator_message().unwrap(), "You've launched 1 meme token! 🚀");
        stats.creator_launch_count = Some(U256::from(3u64));
        assert_eq!(stats.creator_message().unwrap(), "You've launched 3 meme tokens! 🚀");
    }
}
