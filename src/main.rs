use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use meme_launcher::commands::{
    admin::{run_admin, AdminAction},
    launch::launch_token,
    quote::quote_launch,
    settings::show_settings,
    stats::{show_recent, show_stats},
};
use meme_launcher::config::CONFIG;
use meme_launcher::models::launch::{DEFAULT_ETH_AMOUNT, DEFAULT_LIQUIDITY_PERCENT, DEFAULT_TOTAL_SUPPLY};
use meme_launcher::models::LaunchRequest;

#[derive(Parser, Debug)]
#[command(
    name = "meme-launcher",
    version,
    about = "Launch meme tokens with instant liquidity through the on-chain launcher contract",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct TokenArgs {
    /// Token name
    #[arg(short, long)]
    name: String,
    /// Token symbol (upper-cased automatically)
    #[arg(short, long)]
    symbol: String,
    /// Total supply in whole tokens
    #[arg(long, default_value = DEFAULT_TOTAL_SUPPLY)]
    total_supply: String,
    /// Share of the supply paired into the pool (1-100)
    #[arg(long, default_value = DEFAULT_LIQUIDITY_PERCENT)]
    liquidity_percent: String,
    /// ETH attached to the launch, including the 1% fee
    #[arg(long, default_value = DEFAULT_ETH_AMOUNT)]
    eth: String,
}

impl TokenArgs {
    fn into_request(self) -> LaunchRequest {
        let mut request = LaunchRequest::new(&self.name, &self.symbol);
        request.total_supply = self.total_supply;
        request.liquidity_percent = self.liquidity_percent;
        request.eth_amount = self.eth;
        request
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch a new meme token with initial liquidity
    Launch(TokenArgs),
    /// Show the fee split and validation result without sending anything
    Quote {
        #[command(flatten)]
        token: TokenArgs,
        /// Skip reading the contract minimum
        #[arg(long)]
        offline: bool,
    },
    /// Launcher totals and your own launch count
    Stats,
    /// Most recent launched tokens
    Recent,
    /// Show the effective configuration
    Settings {
        /// Write the settings file so it can be edited
        #[arg(long)]
        write: bool,
    },
    /// Owner-only launcher maintenance
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand, Debug)]
enum AdminCommands {
    /// Update the minimum ETH required per launch
    SetMinEth {
        /// New minimum in ETH, e.g. 0.1
        amount: String,
    },
    /// Withdraw the contract's ETH balance to the owner
    Withdraw,
    /// Withdraw an ERC-20 balance held by the contract
    WithdrawToken {
        /// Token contract address (0x...)
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = CONFIG.as_ref();
    info!("Using launcher {:#x} on chain {}", config.launcher_address, config.chain_id);

    match cli.command {
        Commands::Launch(token) => {
            launch_token(token.into_request(), config)
                .await
                .context("Failed to launch token")?;
        }
        Commands::Quote { token, offline } => {
            quote_launch(&token.into_request(), config, offline)
                .await
                .context("Failed to quote launch")?;
        }
        Commands::Stats => {
            show_stats(config).await.context("Failed to load launcher stats")?;
        }
        Commands::Recent => {
            show_recent(config).await.context("Failed to load recent launches")?;
        }
        Commands::Settings { write } => {
            show_settings(config, write).context("Failed to write settings")?;
        }
        Commands::Admin(admin) => {
            let action = match admin {
                AdminCommands::SetMinEth { amount } => AdminAction::SetMinLaunchEth(amount),
                AdminCommands::Withdraw => AdminAction::EmergencyWithdraw,
                AdminCommands::WithdrawToken { token } => AdminAction::EmergencyWithdrawToken(token),
            };
            run_admin(action, config).await.context("Admin action failed")?;
        }
    }

    Ok(())
}
