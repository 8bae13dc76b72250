//! Recovers the created token's address from a launch receipt.
//!
//! The launcher contract emits its creation event as the first log of the
//! transaction, with the new token as the second indexed parameter, i.e.
//! `logs[0].topics[2]`. Nothing else links a launch transaction to its token,
//! so if the contract ever reorders its events or indexes different fields
//! this silently degrades to `None`.
// TODO: match on the creation event signature (topics[0]) once the launcher ABI publishes it

use ethers::types::{Address, TransactionReceipt, H256};

pub const CREATION_LOG_INDEX: usize = 0;
pub const TOKEN_TOPIC_INDEX: usize = 2;

// "0x" plus the 24 hex characters of left padding in front of an indexed address.
const TOPIC_ADDRESS_OFFSET: usize = 26;

/// Address sitting in the creation log's token topic, if the receipt has one.
pub fn extract_token_address(receipt: &TransactionReceipt) -> Option<Address> {
    let log = receipt.logs.get(CREATION_LOG_INDEX)?;
    let topic = log.topics.get(TOKEN_TOPIC_INDEX)?;
    Some(address_from_topic(topic))
}

/// Same extraction over wire-format topics (`0x`-prefixed hex strings), one
/// topic list per log in receipt order. Everything after the padding is
/// returned as `0x`-prefixed text; short topics keep whatever follows it.
/// Malformed hex or nothing past the padding yields `None`.
pub fn extract_token_address_from_topics(logs: &[Vec<String>]) -> Option<String> {
    let topics = logs.get(CREATION_LOG_INDEX)?;
    let raw = topics.get(TOKEN_TOPIC_INDEX)?.trim();
    let digits = raw.strip_prefix("0x")?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match raw.get(TOPIC_ADDRESS_OFFSET..) {
        Some(tail) if !tail.is_empty() => Some(format!("0x{}", tail)),
        _ => None,
    }
}

/// Indexed address parameters are left-padded to 32 bytes; the address is
/// the low-order 20.
pub fn address_from_topic(topic: &H256) -> Address {
    Address::from_slice(&topic.as_bytes()[12..])
}

/// `0x` followed by 40 lowercase hex characters.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}
