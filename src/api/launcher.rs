use async_trait::async_trait;
use ethers::{
    contract::abigen,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TransactionReceipt, TxHash, U256},
};
use log::{debug, info};
use std::str::FromStr;
use std::sync::Arc;

use crate::admin::AdminWriter;
use crate::config::Config;
use crate::errors::{LauncherError, Result, SubmissionError};
use crate::launch::ports::{LaunchCall, LaunchSubmitter, LauncherReader, ReceiptSource};

abigen!(
    MemeLauncher,
    r#"[
        function owner() external view returns (address)
        function minLaunchEth() external view returns (uint256)
        function totalLaunches() external view returns (uint256)
        function totalFeesCollected() external view returns (uint256)
        function getCreatorLaunchCount(address creator) external view returns (uint256)
        function getAllLaunchedTokens() external view returns (address[])
        function launchMeme(string name, string symbol, uint256 totalSupply, uint256 liquidityPercent) external payable returns (address)
        function setMinLaunchEth(uint256 newMinLaunchEth) external
        function emergencyWithdraw() external
        function emergencyWithdrawToken(address token) external
    ]"#
);

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

fn contract_err<E: std::fmt::Display>(method: &str) -> impl FnOnce(E) -> LauncherError + '_ {
    move |e| LauncherError::Contract(format!("{}: {}", method, e))
}

/// JSON-RPC client for the launcher contract. Without a signing key it is
/// read-only and every write returns an error.
pub struct EthLauncherClient {
    provider: Arc<Provider<Http>>,
    signer: Option<Arc<SignerClient>>,
    address: Address,
}

impl EthLauncherClient {
    pub fn connect(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let url = url::Url::parse(&config.rpc_url)?;
        let provider = Arc::new(Provider::new(Http::new_with_client(url, http_client)));
        info!("Connected to RPC {} (chain {})", config.rpc_url, config.chain_id);

        let signer = match &config.private_key {
            Some(key) => {
                let wallet = LocalWallet::from_str(key.trim_start_matches("0x"))?.with_chain_id(config.chain_id);
                info!("Signing as {:?}", wallet.address());
                Some(Arc::new(SignerMiddleware::new((*provider).clone(), wallet)))
            }
            None => {
                info!("No signing key configured; running read-only");
                None
            }
        };

        Ok(EthLauncherClient {
            provider,
            signer,
            address: config.launcher_address,
        })
    }

    pub fn launcher_address(&self) -> Address {
        self.address
    }

    /// Address of the configured signer, if any.
    pub fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    /// Native balance of the configured signer.
    pub async fn account_balance(&self) -> Result<Option<U256>> {
        match self.account() {
            Some(account) => Ok(Some(self.provider.get_balance(account, None).await?)),
            None => Ok(None),
        }
    }

    fn reader(&self) -> MemeLauncher<Provider<Http>> {
        MemeLauncher::new(self.address, Arc::clone(&self.provider))
    }

    fn writer(&self) -> Result<MemeLauncher<SignerClient>> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            LauncherError::Config("Connect your wallet to launch: no signing key configured".to_string())
        })?;
        Ok(MemeLauncher::new(self.address, Arc::clone(signer)))
    }
}

#[async_trait]
impl LauncherReader for EthLauncherClient {
    async fn owner(&self) -> Result<Address> {
        self.reader().owner().call().await.map_err(contract_err("owner"))
    }

    async fn min_launch_eth(&self) -> Result<U256> {
        self.reader().min_launch_eth().call().await.map_err(contract_err("minLaunchEth"))
    }

    async fn total_launches(&self) -> Result<U256> {
        self.reader().total_launches().call().await.map_err(contract_err("totalLaunches"))
    }

    async fn total_fees_collected(&self) -> Result<U256> {
        self.reader()
            .total_fees_collected()
            .call()
            .await
            .map_err(contract_err("totalFeesCollected"))
    }

    async fn creator_launch_count(&self, creator: Address) -> Result<U256> {
        self.reader()
            .get_creator_launch_count(creator)
            .call()
            .await
            .map_err(contract_err("getCreatorLaunchCount"))
    }

    async fn launched_tokens(&self) -> Result<Vec<Address>> {
        self.reader()
            .get_all_launched_tokens()
            .call()
            .await
            .map_err(contract_err("getAllLaunchedTokens"))
    }
}

#[async_trait]
impl LaunchSubmitter for EthLauncherClient {
    async fn submit(&self, call: &LaunchCall) -> std::result::Result<TxHash, SubmissionError> {
        let contract = self.writer()?;
        let tx = contract
            .launch_meme(
                call.name.clone(),
                call.symbol.clone(),
                call.total_supply,
                call.liquidity_percent,
            )
            .value(call.value);
        debug!("launchMeme calldata prepared for {} ({})", call.name, call.symbol);
        let pending = tx.send().await.map_err(|e| SubmissionError(e.to_string()))?;
        Ok(pending.tx_hash())
    }
}

#[async_trait]
impl ReceiptSource for EthLauncherClient {
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>> {
        Ok(self.provider.get_transaction_receipt(tx_hash).await?)
    }
}

#[async_trait]
impl AdminWriter for EthLauncherClient {
    async fn set_min_launch_eth(&self, min_wei: U256) -> Result<TxHash> {
        let contract = self.writer()?;
        let tx = contract.set_min_launch_eth(min_wei);
        let pending = tx.send().await.map_err(contract_err("setMinLaunchEth"))?;
        Ok(pending.tx_hash())
    }

    async fn emergency_withdraw(&self) -> Result<TxHash> {
        let contract = self.writer()?;
        let tx = contract.emergency_withdraw();
        let pending = tx.send().await.map_err(contract_err("emergencyWithdraw"))?;
        Ok(pending.tx_hash())
    }

    async fn emergency_withdraw_token(&self, token: Address) -> Result<TxHash> {
        let contract = self.writer()?;
        let tx = contract.emergency_withdraw_token(token);
        let pending = tx.send().await.map_err(contract_err("emergencyWithdrawToken"))?;
        Ok(pending.tx_hash())
    }
}
