// src/utils/mod.rs

use std::time::Duration;

pub mod links;
pub mod units;

pub use links::{explorer_address_url, explorer_tx_url, share_url, trade_url, truncate_address};
pub use units::{format_ether, format_units, parse_ether, parse_units, ETHER_DECIMALS};

/// Sleep for the specified milliseconds
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Renders an elapsed wait as `1m 05s` / `12s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_elapsed_time() {
        assert_eq!(format_elapsed(Duration::from_secs(12)), "12s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m 05s");
    }
}
