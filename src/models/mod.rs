pub mod launch;
pub mod settings;
pub mod stats;

use ethers::types::TxHash;

pub use launch::{LaunchRequest, LaunchResult};

/// Status updates emitted by the launch orchestrator as it moves between phases.
/// Consumers receive them over an unbounded channel and render them however
/// they like (the CLI prints them as they arrive).
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchStatus {
    Validating,
    ValidationFailed(String),
    Submitting,
    Submitted(TxHash),
    SubmissionFailed(String),
    Confirmed(TxHash),
    Succeeded(LaunchResult),
    ConfirmationFailed(TxHash, String),
    ConfirmedWithoutResult(TxHash), // receipt had no creation log at the expected slot
    Reset,
}
