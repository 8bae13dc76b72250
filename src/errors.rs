use ethers::providers::ProviderError;
use ethers::signers::WalletError;
use ethers::types::TxHash;
use thiserror::Error;

use crate::launch::validator::ValidationError;
use crate::utils::units::UnitsError;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Contract call error: {0}")]
    Contract(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Units conversion error: {0}")]
    Units(#[from] UnitsError),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, LauncherError>;

impl From<anyhow::Error> for LauncherError {
    fn from(err: anyhow::Error) -> Self {
        LauncherError::Generic(err.to_string())
    }
}

/// Failure to broadcast the launch transaction. Wallet rejections, missing
/// funds, RPC outages and reverts during gas estimation all land here with
/// the underlying message forwarded as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SubmissionError(pub String);

impl From<LauncherError> for SubmissionError {
    fn from(err: LauncherError) -> Self {
        SubmissionError(err.to_string())
    }
}

/// Errors surfaced by the launch lifecycle. None of them are fatal; each one
/// leaves the orchestrator in a state the user can act on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("Please fill all fields correctly: {0}")]
    Validation(#[from] ValidationError),

    #[error("Launch failed: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Transaction failed on-chain: {0}")]
    Confirmation(String),

    #[error("Transaction {0:#x} confirmed but no token address was found in its logs")]
    ExtractionAmbiguity(TxHash),

    #[error("A launch is already in flight")]
    InFlight,

    #[error("Launch already succeeded; reset before launching another")]
    AlreadyLaunched,

    #[error("Launch parameters cannot be edited while a launch is in flight")]
    RequestFrozen,

    #[error("Cannot reset while the transaction is still unresolved ({0})")]
    ResetNotAllowed(String),
}
