use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fee decimal places shown next to the launch form.
pub const FEE_DISPLAY_DP: u32 = 4;

/// Protocol fee taken by the launcher contract: 1%.
pub fn fee_rate() -> Decimal {
    Decimal::new(1, 2)
}

/// Advisory split of the attached ETH into protocol fee and pool liquidity.
/// The contract deducts the authoritative fee on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub eth_amount: Decimal,
    pub launch_fee: Decimal,
    pub net_liquidity: Decimal,
}

impl FeeBreakdown {
    /// Fee and net liquidity rounded to four decimals.
    pub fn display(&self) -> (String, String) {
        (format_fee_amount(self.launch_fee), format_fee_amount(self.net_liquidity))
    }

    /// The form only shows the breakdown once some ETH is entered.
    pub fn is_visible(&self) -> bool {
        self.eth_amount > Decimal::ZERO
    }
}

/// Derives the fee split from the raw ETH input. Unparseable input counts as
/// zero and non-positive amounts carry no fee; rejecting them is the
/// validator's job.
pub fn compute_fees(eth_amount: &str) -> FeeBreakdown {
    let eth_amount = Decimal::from_str(eth_amount.trim()).unwrap_or(Decimal::ZERO);
    compute_fees_for(eth_amount)
}

pub fn compute_fees_for(eth_amount: Decimal) -> FeeBreakdown {
    if eth_amount <= Decimal::ZERO {
        return FeeBreakdown {
            eth_amount,
            launch_fee: Decimal::ZERO,
            net_liquidity: eth_amount,
        };
    }

    let launch_fee = eth_amount.checked_mul(fee_rate()).unwrap_or(Decimal::ZERO);

    FeeBreakdown {
        eth_amount,
        launch_fee,
        net_liquidity: eth_amount - launch_fee,
    }
}

/// Rounds half away from zero to [`FEE_DISPLAY_DP`] places and always shows
/// all four of them.
pub fn format_fee_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(FEE_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.4}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn one_tenth_eth() {
        let fees = compute_fees("0.1");
        assert_eq!(fees.launch_fee, dec("0.001"));
        assert_eq!(fees.net_liquidity, dec("0.099"));
        assert_eq!(fees.display(), ("0.0010".to_string(), "0.0990".to_string()));
    }

    #[test]
    fn fee_is_exact_and_parts_sum_to_input() {
        for input in ["0.1", "1", "0.123456", "2.5", "0.00005", "0.00999", "1234.56789"] {
            let fees = compute_fees(input);
            assert_eq!(fees.launch_fee, dec(input) * dec("0.01"), "input {input}");
            assert_eq!(fees.launch_fee + fees.net_liquidity, dec(input), "input {input}");
        }
    }

    #[test]
    fn display_rounds_instead_of_truncating() {
        assert_eq!(compute_fees("0.00999").display(), ("0.0001".to_string(), "0.0099".to_string()));
        assert_eq!(compute_fees("1.99999").display(), ("0.0200".to_string(), "1.9800".to_string()));
        assert_eq!(compute_fees("0.123456").display(), ("0.0012".to_string(), "0.1222".to_string()));
    }

    #[test]
    fn display_midpoint_rounds_away_from_zero() {
        assert_eq!(format_fee_amount(dec("0.00005")), "0.0001");
        assert_eq!(format_fee_amount(dec("0.00004")), "0.0000");
        assert_eq!(format_fee_amount(dec("2")), "2.0000");
    }

    #[test]
    fn non_positive_amounts_carry_no_fee() {
        let zero = compute_fees("0");
        assert_eq!(zero.launch_fee, Decimal::ZERO);
        assert_eq!(zero.net_liquidity, Decimal::ZERO);
        assert!(!zero.is_visible());

        let negative = compute_fees("-1");
        assert_eq!(negative.launch_fee, Decimal::ZERO);
        assert_eq!(negative.net_liquidity, dec("-1"));
    }

    #[test]
    fn garbage_counts_as_zero() {
        let fees = compute_fees("lots");
        assert_eq!(fees.eth_amount, Decimal::ZERO);
        assert_eq!(fees.launch_fee, Decimal::ZERO);
        assert!(!fees.is_visible());
    }
}
