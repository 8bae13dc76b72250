use console::{style, Style};
use prettytable::{row, Table};

use crate::commands::utils::connect;
use crate::config::Config;
use crate::errors::Result;
use crate::models::stats::LauncherStats;
use crate::utils::links::{explorer_address_url, truncate_address};
use crate::launch::format_address;
use crate::utils::format_ether;

/// Launcher-wide totals plus the signer's own launch count.
pub async fn show_stats(config: &Config) -> Result<()> {
    let info_style = Style::new().cyan();
    println!("\n{}", info_style.apply_to("📊 Launcher Stats").bold());

    let client = connect(config)?;
    let stats = LauncherStats::fetch(client.as_ref(), client.account()).await?;

    let mut table = Table::new();
    table.add_row(row!["Launcher", format_address(&client.launcher_address())]);
    table.add_row(row!["Total Launches", stats.total_launches_display()]);
    table.add_row(row!["Fees Collected", stats.fees_collected_display()]);
    table.add_row(row!["Min Launch", stats.min_launch_eth_display()]);
    if let Some(owner) = stats.owner {
        table.add_row(row!["Owner", truncate_address(&format_address(&owner))]);
    }
    if let Some(balance) = client.account_balance().await? {
        table.add_row(row!["Your Balance", format!("{} ETH", format_ether(balance))]);
    }
    table.printstd();

    match stats.creator_message() {
        Some(message) => println!("{}", style(message).green()),
        None if client.account().is_none() => {
            println!("{} Connect your wallet to see your launches", style("🔒").yellow())
        }
        None => {}
    }
    Ok(())
}

/// Most recent launches, newest first.
pub async fn show_recent(config: &Config) -> Result<()> {
    let info_style = Style::new().cyan();
    println!("\n{}", info_style.apply_to("🆕 Recent Launches").bold());

    let client = connect(config)?;
    let stats = LauncherStats::fetch(client.as_ref(), None).await?;
    let recent = stats.recent_launches();
    if recent.is_empty() {
        println!("No tokens launched yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row!["#", "Token", "Explorer"]);
    for launch in &recent {
        table.add_row(row![
            format!("#{}", launch.number),
            launch.short_address(),
            explorer_address_url(&config.explorer_url, &launch.address)
        ]);
    }
    table.printstd();
    println!("Total launches: {}", stats.launched_tokens_display());
    Ok(())
}
