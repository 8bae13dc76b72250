use ethers::types::{TransactionReceipt, TxHash, U64};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::launch::ports::ReceiptSource;

/// What the chain said about a tracked transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Confirmed(TransactionReceipt),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    #[default]
    Unsubmitted,
    Pending(TxHash),
    Confirmed(TxHash, TransactionReceipt),
    Failed(TxHash, String),
}

impl ConfirmationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConfirmationState::Confirmed(..) | ConfirmationState::Failed(..))
    }
}

/// Latest observed confirmation state for the one handle being tracked.
/// Terminal states stick until a new handle is tracked.
#[derive(Debug, Default)]
pub struct ConfirmationTracker {
    state: ConfirmationState,
}

impl ConfirmationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn handle(&self) -> Option<TxHash> {
        match &self.state {
            ConfirmationState::Unsubmitted => None,
            ConfirmationState::Pending(h)
            | ConfirmationState::Confirmed(h, _)
            | ConfirmationState::Failed(h, _) => Some(*h),
        }
    }

    /// Starts tracking `handle`, superseding whatever was tracked before.
    pub fn track(&mut self, handle: TxHash) {
        debug!("Tracking confirmation for {:#x}", handle);
        self.state = ConfirmationState::Pending(handle);
    }

    /// Applies an observation. Returns `false` when it was ignored because it
    /// belongs to another handle or the current one already settled.
    pub fn observe(&mut self, handle: TxHash, observation: Observation) -> bool {
        match &self.state {
            ConfirmationState::Pending(current) if *current == handle => {}
            ConfirmationState::Pending(current) => {
                debug!("Ignoring observation for {:#x}; tracking {:#x}", handle, current);
                return false;
            }
            _ => {
                debug!("Ignoring observation for {:#x}; nothing pending", handle);
                return false;
            }
        }

        self.state = match observation {
            Observation::Confirmed(receipt) => ConfirmationState::Confirmed(handle, receipt),
            Observation::Failed(message) => ConfirmationState::Failed(handle, message),
        };
        true
    }

    pub fn clear(&mut self) {
        self.state = ConfirmationState::Unsubmitted;
    }
}

/// Classifies an included receipt. Status `0` is an on-chain revert.
pub fn classify_receipt(receipt: TransactionReceipt) -> Observation {
    if receipt.status == Some(U64::zero()) {
        Observation::Failed("transaction reverted during execution".to_string())
    } else {
        Observation::Confirmed(receipt)
    }
}

/// Polls `source` for the receipt of `tx_hash` until it is included, then
/// sends exactly one observation through `sender` and stops. Read errors are
/// logged and retried on the next tick; there is no overall timeout.
pub fn watch_confirmation<S, E, F>(
    source: Arc<S>,
    tx_hash: TxHash,
    poll_interval: Duration,
    sender: UnboundedSender<E>,
    wrap: F,
) -> JoinHandle<()>
where
    S: ReceiptSource + ?Sized + 'static,
    E: Send + 'static,
    F: Fn(TxHash, Observation) -> E + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticks: u64 = 0;
        loop {
            match source.receipt(tx_hash).await {
                Ok(Some(receipt)) => {
                    let observation = classify_receipt(receipt);
                    info!("Transaction {:#x} included after {} polls", tx_hash, ticks);
                    let _ = sender.send(wrap(tx_hash, observation));
                    return;
                }
                Ok(None) => {
                    debug!("Transaction {:#x} still pending", tx_hash);
                }
                Err(e) => {
                    warn!("Failed to fetch receipt for {:#x}: {}. Retrying.", tx_hash, e);
                }
            }
            if sender.is_closed() {
                debug!("Receiver dropped; stopping watch for {:#x}", tx_hash);
                return;
            }
            ticks += 1;
            tokio::time::sleep(poll_interval).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LauncherError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::mpsc::unbounded_channel;

    fn hash(b: u8) -> TxHash {
        TxHash::repeat_byte(b)
    }

    fn ok_receipt() -> TransactionReceipt {
        TransactionReceipt { status: Some(U64::one()), ..Default::default() }
    }

    #[test]
    fn starts_unsubmitted() {
        let tracker = ConfirmationTracker::new();
        assert_eq!(tracker.state(), &ConfirmationState::Unsubmitted);
        assert_eq!(tracker.handle(), None);
    }

    #[test]
    fn tracking_enters_pending() {
        let mut tracker = ConfirmationTracker::new();
        tracker.track(hash(1));
        assert_eq!(tracker.state(), &ConfirmationState::Pending(hash(1)));
        assert_eq!(tracker.handle(), Some(hash(1)));
    }

    #[test]
    fn terminal_state_is_stable() {
        let mut tracker = ConfirmationTracker::new();
        tracker.track(hash(1));
        assert!(tracker.observe(hash(1), Observation::Confirmed(ok_receipt())));
        assert!(!tracker.observe(hash(1), Observation::Failed("late".into())));
        assert_eq!(tracker.state(), &ConfirmationState::Confirmed(hash(1), ok_receipt()));
        assert!(tracker.state().is_terminal());
    }

    #[test]
    fn observations_for_other_handles_are_ignored() {
        let mut tracker = ConfirmationTracker::new();
        assert!(!tracker.observe(hash(9), Observation::Confirmed(ok_receipt())));
        tracker.track(hash(1));
        assert!(!tracker.observe(hash(2), Observation::Failed("other".into())));
        assert_eq!(tracker.state(), &ConfirmationState::Pending(hash(1)));
    }

    #[test]
    fn new_handle_supersedes_settled_one() {
        let mut tracker = ConfirmationTracker::new();
        tracker.track(hash(1));
        tracker.observe(hash(1), Observation::Failed("reverted".into()));
        tracker.track(hash(2));
        assert_eq!(tracker.state(), &ConfirmationState::Pending(hash(2)));
        assert!(!tracker.observe(hash(1), Observation::Confirmed(ok_receipt())));
    }

    #[test]
    fn reverted_receipts_are_failures() {
        let reverted = TransactionReceipt { status: Some(U64::zero()), ..Default::default() };
        assert!(matches!(classify_receipt(reverted), Observation::Failed(_)));
        assert!(matches!(classify_receipt(ok_receipt()), Observation::Confirmed(_)));
        // pre-byzantium receipts carry no status
        assert!(matches!(classify_receipt(TransactionReceipt::default()), Observation::Confirmed(_)));
    }

    struct ScriptedSource {
        responses: Mutex<Vec<Result<Option<TransactionReceipt>>>>,
    }

    #[async_trait]
    impl ReceiptSource for ScriptedSource {
        async fn receipt(&self, _tx_hash: TxHash) -> Result<Option<TransactionReceipt>> {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Ok(None)
            } else {
                responses.remove(0)
            }
        }
    }

    #[tokio::test]
    async fn watcher_reports_once_after_pending_and_errors() {
        let source = Arc::new(ScriptedSource {
            responses: Mutex::new(vec![
                Ok(None),
                Err(LauncherError::Transaction("rpc hiccup".into())),
                Ok(Some(ok_receipt())),
            ]),
        });
        let (tx, mut rx) = unbounded_channel();
        let task = watch_confirmation(source, hash(7), Duration::from_millis(1), tx, |h, o| (h, o));
        task.await.unwrap();

        let (h, observation) = rx.recv().await.unwrap();
        assert_eq!(h, hash(7));
        assert_eq!(observation, Observation::Confirmed(ok_receipt()));
        assert!(rx.try_recv().is_err());
    }
}
