//! Launch transaction lifecycle: validate, submit, confirm, extract.

pub mod fees;
pub mod orchestrator;
pub mod ports;
pub mod receipt;
pub mod tracker;
pub mod validator;

pub use fees::{compute_fees, FeeBreakdown};
pub use orchestrator::{default_min_launch_eth, LaunchOrchestrator, LaunchPhase};
pub use ports::{LaunchCall, LaunchChain, LaunchSubmitter, LauncherReader, ReceiptSource};
pub use receipt::{extract_token_address, format_address};
pub use tracker::{ConfirmationState, ConfirmationTracker, Observation};
pub use validator::{validate, ValidationError, ValidationIssue};
