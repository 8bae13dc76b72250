use ethers::types::{Address, TxHash};
use url::Url;

use crate::errors::Result;
use crate::launch::receipt::format_address;

const SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Block-explorer page for a transaction.
pub fn explorer_tx_url(explorer_url: &str, tx_hash: &TxHash) -> String {
    format!("{}/tx/{:#x}", explorer_url.trim_end_matches('/'), tx_hash)
}

/// Block-explorer page for a token or account.
pub fn explorer_address_url(explorer_url: &str, address: &Address) -> String {
    format!("{}/address/{}", explorer_url.trim_end_matches('/'), format_address(address))
}

/// DEX swap page with the launched token preselected as output.
pub fn trade_url(dex_url: &str, dex_chain: &str, token: &Address) -> String {
    format!(
        "{}/#/swap?chain={}&outputCurrency={}",
        dex_url.trim_end_matches('/'),
        dex_chain,
        format_address(token)
    )
}

pub fn share_text(name: &str, symbol: &str, token: &Address) -> String {
    format!(
        "🚀 Just launched {} (${}) on @base!\n\nToken: {}\n\n#Base #Memecoins",
        name,
        symbol,
        format_address(token)
    )
}

/// Share-intent URL with the announcement text percent-encoded.
pub fn share_url(name: &str, symbol: &str, token: &Address) -> Result<String> {
    let mut url = Url::parse(SHARE_INTENT_URL)?;
    url.query_pairs_mut().append_pair("text", &share_text(name, symbol, token));
    Ok(url.to_string())
}

/// `0x1234...abcd` style shortening used in lists.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn token() -> Address {
        Address::from_str("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap()
    }

    #[test]
    fn builds_explorer_links() {
        let hash = TxHash::repeat_byte(0x11);
        assert_eq!(
            explorer_tx_url("https://sepolia.basescan.org/", &hash),
            format!("https://sepolia.basescan.org/tx/0x{}", "11".repeat(32))
        );
        assert_eq!(
            explorer_address_url("https://sepolia.basescan.org", &token()),
            "https://sepolia.basescan.org/address/0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        );
    }

    #[test]
    fn builds_trade_link() {
        assert_eq!(
            trade_url("https://app.uniswap.org", "base_sepolia", &token()),
            "https://app.uniswap.org/#/swap?chain=base_sepolia&outputCurrency=0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        );
    }

    #[test]
    fn share_url_encodes_the_text() {
        let url = share_url("DogeMoon", "DOGEM", &token()).unwrap();
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        let parsed = Url::parse(&url).unwrap();
        let (_, text) = parsed.query_pairs().next().unwrap();
        assert!(text.contains("DogeMoon ($DOGEM)"));
    }

    #[test]
    fn truncates_long_addresses_only() {
        assert_eq!(
            truncate_address("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabcde"),
            "0xaaaa...bcde"
        );
        assert_eq!(truncate_address("0x1234"), "0x1234");
    }
}
