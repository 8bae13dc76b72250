use console::{style, Style};
use ethers::types::TxHash;
use log::info;
use tokio::sync::mpsc::unbounded_channel;

use crate::admin::{ensure_owner, parse_min_launch_eth, parse_token_address, AdminWriter};
use crate::commands::utils::{connect_signer, print_tx_link, spinner};
use crate::config::Config;
use crate::errors::{LauncherError, Result};
use crate::launch::ports::LauncherReader;
use crate::launch::tracker::{watch_confirmation, Observation};
use crate::utils::format_ether;

#[derive(Debug, Clone)]
pub enum AdminAction {
    SetMinLaunchEth(String),
    EmergencyWithdraw,
    EmergencyWithdrawToken(String),
}

/// Runs one owner-only action and waits for its receipt.
pub async fn run_admin(action: AdminAction, config: &Config) -> Result<()> {
    let info_style = Style::new().cyan();
    println!("\n{}", info_style.apply_to("🛠  Admin Panel").bold());

    let client = connect_signer(config)?;
    let owner = client.owner().await?;
    ensure_owner(client.account(), owner)?;

    let (label, tx_hash) = match action {
        AdminAction::SetMinLaunchEth(input) => {
            let min_wei = parse_min_launch_eth(&input)?;
            info!("Setting minimum launch value to {} ETH", format_ether(min_wei));
            ("Update min ETH", client.set_min_launch_eth(min_wei).await?)
        }
        AdminAction::EmergencyWithdraw => ("Emergency withdraw", client.emergency_withdraw().await?),
        AdminAction::EmergencyWithdrawToken(input) => {
            let token = parse_token_address(&input)?;
            ("Withdraw token", client.emergency_withdraw_token(token).await?)
        }
    };
    print_tx_link("Transaction:", &config.explorer_url, &tx_hash);

    let pb = spinner(&format!("{}: confirming...", label));
    let (tx, mut rx) = unbounded_channel::<(TxHash, Observation)>();
    let watcher = watch_confirmation(
        client,
        tx_hash,
        config.confirmation_poll_interval,
        tx,
        |hash, observation| (hash, observation),
    );
    let outcome = rx.recv().await;
    watcher.abort();
    pb.finish_and_clear();

    match outcome {
        Some((_, Observation::Confirmed(_))) => {
            println!("{} {} confirmed", style("✅").green(), label);
            Ok(())
        }
        Some((_, Observation::Failed(msg))) => {
            Err(LauncherError::Transaction(format!("{} failed: {}", label, msg)))
        }
        None => Err(LauncherError::Transaction(format!(
            "{}: confirmation watcher stopped before the receipt arrived",
            label
        ))),
    }
}
