use async_trait::async_trait;
use ethers::types::{Address, TransactionReceipt, TxHash, U256};

use crate::errors::{Result, SubmissionError};

/// Arguments of `launchMeme(name, symbol, totalSupply, liquidityPercent)`
/// plus the ETH value attached to it. Amounts are already fixed-point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCall {
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    pub liquidity_percent: U256,
    pub value: U256,
}

/// Read side of the launcher contract. Values may be stale between reads.
#[async_trait]
pub trait LauncherReader: Send + Sync {
    async fn owner(&self) -> Result<Address>;
    async fn min_launch_eth(&self) -> Result<U256>;
    async fn total_launches(&self) -> Result<U256>;
    async fn total_fees_collected(&self) -> Result<U256>;
    async fn creator_launch_count(&self, creator: Address) -> Result<U256>;
    /// Every launched token in insertion order.
    async fn launched_tokens(&self) -> Result<Vec<Address>>;
}

/// Broadcasts the single state-changing launch call.
#[async_trait]
pub trait LaunchSubmitter: Send + Sync {
    async fn submit(&self, call: &LaunchCall) -> std::result::Result<TxHash, SubmissionError>;
}

/// Where confirmation observations come from. `Ok(None)` means the
/// transaction is not included yet.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>>;
}

/// Everything the launch orchestrator needs from the chain.
pub trait LaunchChain: LauncherReader + LaunchSubmitter + ReceiptSource + 'static {}

impl<T> LaunchChain for T where T: LauncherReader + LaunchSubmitter + ReceiptSource + 'static {}
