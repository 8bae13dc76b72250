use console::{style, Style};
use log::{info, warn};
use prettytable::{row, Table};
use tokio::sync::mpsc::unbounded_channel;

use crate::commands::utils::{connect_signer, print_status, print_tx_link, spinner};
use crate::config::Config;
use crate::errors::{LauncherError, Result};
use crate::launch::{LaunchOrchestrator, LaunchPhase};
use crate::models::{LaunchRequest, LaunchResult};
use crate::utils::links::{explorer_address_url, share_url, trade_url};
use crate::utils::{format_elapsed, format_ether, sleep_ms};

const STATUS_REFRESH_MS: u64 = 200;

/// Launches one token and waits until the receipt settles.
pub async fn launch_token(request: LaunchRequest, config: &Config) -> Result<LaunchResult> {
    let info_style = Style::new().cyan();
    println!("\n{}", info_style.apply_to("🚀 Launching Meme Token...").bold());

    let client = connect_signer(config)?;
    let (status_tx, mut status_rx) = unbounded_channel();
    let mut orchestrator = LaunchOrchestrator::new(client, config.confirmation_poll_interval)
        .with_status_sender(status_tx);

    match orchestrator.refresh_constraints().await {
        Ok(min_wei) => info!("Launcher minimum: {} ETH", format_ether(min_wei)),
        Err(e) => warn!("Could not read minLaunchEth, assuming {} ETH: {}", format_ether(orchestrator.min_launch_eth()), e),
    }

    orchestrator.set_request(request)?;
    print_request_table(&orchestrator);

    if let Err(e) = orchestrator.submit() {
        while let Ok(status) = status_rx.try_recv() {
            print_status(&status, &config.explorer_url);
        }
        return Err(e.into());
    }

    let pb = spinner(orchestrator.status_label());
    loop {
        let phase = orchestrator.poll();
        while let Ok(status) = status_rx.try_recv() {
            pb.suspend(|| print_status(&status, &config.explorer_url));
        }
        if matches!(phase, LaunchPhase::Succeeded | LaunchPhase::Failed) || orchestrator.is_confirmed_without_result() {
            break;
        }
        let elapsed = orchestrator.elapsed().map(format_elapsed).unwrap_or_default();
        pb.set_message(format!("{} {}", orchestrator.status_label(), elapsed));
        sleep_ms(STATUS_REFRESH_MS).await;
    }
    pb.finish_and_clear();

    if let Some(result) = orchestrator.result().cloned() {
        print_result(&result, config)?;
        return Ok(result);
    }

    match orchestrator.last_error().cloned() {
        Some(err) => {
            if let Some(hash) = orchestrator.transaction_handle() {
                print_tx_link("Transaction:", &config.explorer_url, &hash);
            }
            Err(err.into())
        }
        None => Err(LauncherError::Transaction(format!(
            "launch ended without a result ({})",
            orchestrator.status_label()
        ))),
    }
}

fn print_request_table<C: crate::launch::LaunchChain>(orchestrator: &LaunchOrchestrator<C>) {
    let request = orchestrator.request();
    let fees = orchestrator.fees();
    let (fee, net) = fees.display();

    let mut table = Table::new();
    table.add_row(row!["Token Name", request.name]);
    table.add_row(row!["Symbol", request.symbol]);
    table.add_row(row!["Total Supply", request.total_supply]);
    table.add_row(row!["Liquidity %", request.liquidity_percent]);
    table.add_row(row!["ETH Amount", format!("{} ETH", request.eth_amount)]);
    if fees.is_visible() {
        table.add_row(row!["Launch Fee (1%)", format!("{} ETH", fee)]);
        table.add_row(row!["Net Liquidity", format!("{} ETH", net)]);
    }
    table.add_row(row!["Min Launch", format!("{} ETH", format_ether(orchestrator.min_launch_eth()))]);
    table.printstd();
}

fn print_result(result: &LaunchResult, config: &Config) -> Result<()> {
    println!("\n{}", style("🎉 Meme Launched!").green().bold());
    println!("{:<14} {}", "Token:", style(result.token_address_hex()).bold());
    println!(
        "{:<14} {}",
        "Explorer:",
        explorer_address_url(&config.explorer_url, &result.token_address)
    );
    print_tx_link("Transaction:", &config.explorer_url, &result.transaction_hash);
    println!(
        "{:<14} {}",
        "Trade:",
        trade_url(&config.dex_url, &config.dex_chain, &result.token_address)
    );
    println!(
        "{:<14} {}",
        "Share:",
        share_url(&result.name, &result.symbol, &result.token_address)?
    );
    Ok(())
}
