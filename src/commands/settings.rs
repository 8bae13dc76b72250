use console::{style, Style};
use prettytable::{row, Table};

use crate::config::Config;
use crate::errors::Result;
use crate::launch::format_address;
use crate::models::settings::AppSettings;

/// Prints the effective configuration. With `write`, persists the loaded
/// settings file so it can be edited by hand.
pub fn show_settings(config: &Config, write: bool) -> Result<()> {
    let info_style = Style::new().cyan();
    println!("\n{}", info_style.apply_to("⚙️  Launcher Settings").bold());

    let mut table = Table::new();
    table.add_row(row!["RPC URL", config.rpc_url]);
    table.add_row(row!["Chain ID", config.chain_id]);
    table.add_row(row!["Launcher", format_address(&config.launcher_address)]);
    table.add_row(row!["Explorer", config.explorer_url]);
    table.add_row(row!["DEX", format!("{} ({})", config.dex_url, config.dex_chain)]);
    table.add_row(row!["Poll Interval", format!("{} ms", config.confirmation_poll_interval.as_millis())]);
    table.add_row(row!["Signer", if config.has_signer() { "configured" } else { "none (read-only)" }]);
    table.printstd();

    if write {
        AppSettings::load().save()?;
        println!("{} Settings file written", style("💾").green());
    }
    Ok(())
}
