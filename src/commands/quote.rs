use console::{style, Style};
use log::warn;
use prettytable::{row, Table};

use crate::commands::utils::connect;
use crate::config::Config;
use crate::errors::Result;
use crate::launch::fees::compute_fees;
use crate::launch::ports::LauncherReader;
use crate::launch::validator::validate;
use crate::launch::default_min_launch_eth;
use crate::models::LaunchRequest;
use crate::utils::format_ether;

/// Dry run of the launch form: fee split plus every rule the request breaks.
/// Nothing is signed or sent. With `offline` the contract minimum is not read.
pub async fn quote_launch(request: &LaunchRequest, config: &Config, offline: bool) -> Result<bool> {
    let info_style = Style::new().cyan();
    println!("\n{}", info_style.apply_to("🧮 Launch Quote").bold());

    let min_wei = if offline {
        default_min_launch_eth()
    } else {
        match connect(config)?.min_launch_eth().await {
            Ok(min) => min,
            Err(e) => {
                warn!("Could not read minLaunchEth: {}. Using the default.", e);
                default_min_launch_eth()
            }
        }
    };

    let fees = compute_fees(&request.eth_amount);
    let (fee, net) = fees.display();
    let mut table = Table::new();
    table.add_row(row!["ETH Amount", format!("{} ETH", request.eth_amount.trim())]);
    table.add_row(row!["Launch Fee (1%)", format!("{} ETH", fee)]);
    table.add_row(row!["Net Liquidity", format!("{} ETH", net)]);
    table.add_row(row!["Min Launch", format!("{} ETH", format_ether(min_wei))]);
    table.printstd();

    match validate(request, min_wei) {
        Ok(call) => {
            println!(
                "{} Ready to launch {} ({}) with {} wei attached",
                style("✅").green(),
                call.name,
                call.symbol,
                call.value
            );
            Ok(true)
        }
        Err(e) => {
            println!("{} Please fill all fields correctly:", style("❌").red());
            for issue in &e.issues {
                println!("   - {}", issue);
            }
            Ok(false)
        }
    }
}
