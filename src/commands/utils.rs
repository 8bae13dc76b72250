use console::style;
use ethers::types::TxHash;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::api::EthLauncherClient;
use crate::config::Config;
use crate::errors::{LauncherError, Result};
use crate::models::LaunchStatus;
use crate::utils::links::explorer_tx_url;

/// Connects to the configured RPC endpoint and launcher contract.
pub fn connect(config: &Config) -> Result<Arc<EthLauncherClient>> {
    Ok(Arc::new(EthLauncherClient::connect(config)?))
}

/// Like [`connect`], but refuses to continue without a signing key.
pub fn connect_signer(config: &Config) -> Result<Arc<EthLauncherClient>> {
    if !config.has_signer() {
        println!(
            "{} Connect your wallet to launch: set {} in the environment or .env",
            style("🔒").yellow(),
            crate::config::ENV_PRIVATE_KEY
        );
        return Err(LauncherError::Config("no signing key configured".to_string()));
    }
    connect(config)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// One line per orchestrator status event.
pub fn print_status(status: &LaunchStatus, explorer_url: &str) {
    match status {
        LaunchStatus::Validating => println!("{} Checking parameters...", style("🔎").cyan()),
        LaunchStatus::ValidationFailed(msg) => {
            println!("{} Please fill all fields correctly: {}", style("❌").red(), msg)
        }
        LaunchStatus::Submitting => println!("{} Sending launch transaction...", style("📤").cyan()),
        LaunchStatus::Submitted(hash) => println!(
            "{} Submitted {}\n   {}",
            style("✅").green(),
            style(format!("{:#x}", hash)).bold(),
            explorer_tx_url(explorer_url, hash)
        ),
        LaunchStatus::SubmissionFailed(msg) => println!("{} Launch failed: {}", style("❌").red(), msg),
        LaunchStatus::Confirmed(hash) => println!("{} Confirmed {:#x}", style("⛓").green(), hash),
        LaunchStatus::Succeeded(result) => println!(
            "{} {} ({}) launched at {}",
            style("🎉").green(),
            result.name,
            result.symbol,
            style(result.token_address_hex()).bold()
        ),
        LaunchStatus::ConfirmationFailed(hash, msg) => {
            println!("{} Transaction {:#x} failed on-chain: {}", style("❌").red(), hash, msg)
        }
        LaunchStatus::ConfirmedWithoutResult(hash) => println!(
            "{} Transaction {:#x} confirmed but no token address was found in its logs",
            style("⚠️").yellow(),
            hash
        ),
        LaunchStatus::Reset => {}
    }
}

pub fn print_tx_link(label: &str, explorer_url: &str, hash: &TxHash) {
    println!("{:<14} {}", label, style(explorer_tx_url(explorer_url, hash)).underlined());
}
