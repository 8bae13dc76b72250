use chrono::Utc;
use ethers::types::{TxHash, U256};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::errors::{LaunchError, Result, SubmissionError};
use crate::launch::fees::{compute_fees, FeeBreakdown};
use crate::launch::ports::{LaunchCall, LaunchChain};
use crate::launch::receipt::extract_token_address;
use crate::launch::tracker::{watch_confirmation, ConfirmationState, ConfirmationTracker, Observation};
use crate::launch::validator::validate;
use crate::models::{LaunchRequest, LaunchResult, LaunchStatus};

/// Threshold assumed until the contract has been read once: 0.1 ETH.
pub fn default_min_launch_eth() -> U256 {
    U256::exp10(17)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    Idle,
    Validating,
    Submitting,
    AwaitingConfirmation,
    Succeeded,
    Failed,
}

impl LaunchPhase {
    pub fn label(&self) -> &'static str {
        match self {
            LaunchPhase::Idle => "Launch Meme 🚀",
            LaunchPhase::Validating => "Checking parameters...",
            LaunchPhase::Submitting => "Launching...",
            LaunchPhase::AwaitingConfirmation => "Confirming...",
            LaunchPhase::Succeeded => "Meme Launched! 🎉",
            LaunchPhase::Failed => "Launch failed",
        }
    }
}

// Messages from the submit task and the confirmation watcher. `attempt`
// ties each one to the submission that produced it.
#[derive(Debug)]
enum ChainEvent {
    Submitted {
        attempt: u64,
        result: std::result::Result<TxHash, SubmissionError>,
    },
    Confirmation {
        attempt: u64,
        handle: TxHash,
        observation: Observation,
    },
}

/// Drives one launch at a time from form input to token address.
///
/// All chain interaction happens on spawned tasks that report back over a
/// channel; [`LaunchOrchestrator::poll`] applies whatever has arrived without
/// blocking, so the owner can call it from any UI loop. `submit` spawns onto
/// the current Tokio runtime.
pub struct LaunchOrchestrator<C: LaunchChain> {
    chain: Arc<C>,
    poll_interval: Duration,
    request: LaunchRequest,
    phase: LaunchPhase,
    min_launch_eth: U256,
    attempt: u64,
    tracker: ConfirmationTracker,
    submitted: Option<LaunchCall>,
    submitted_at: Option<Instant>,
    result: Option<LaunchResult>,
    last_error: Option<LaunchError>,
    watcher: Option<JoinHandle<()>>,
    events_tx: UnboundedSender<ChainEvent>,
    events_rx: UnboundedReceiver<ChainEvent>,
    status_sender: Option<UnboundedSender<LaunchStatus>>,
}

impl<C: LaunchChain> LaunchOrchestrator<C> {
    pub fn new(chain: Arc<C>, poll_interval: Duration) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        LaunchOrchestrator {
            chain,
            poll_interval,
            request: LaunchRequest::default(),
            phase: LaunchPhase::Idle,
            min_launch_eth: default_min_launch_eth(),
            attempt: 0,
            tracker: ConfirmationTracker::new(),
            submitted: None,
            submitted_at: None,
            result: None,
            last_error: None,
            watcher: None,
            events_tx,
            events_rx,
            status_sender: None,
        }
    }

    /// Mirrors every phase change into `sender`.
    pub fn with_status_sender(mut self, sender: UnboundedSender<LaunchStatus>) -> Self {
        self.status_sender = Some(sender);
        self
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    pub fn request(&self) -> &LaunchRequest {
        &self.request
    }

    /// Editable form, unless a launch is in flight.
    pub fn request_mut(&mut self) -> std::result::Result<&mut LaunchRequest, LaunchError> {
        if self.is_in_flight() {
            return Err(LaunchError::RequestFrozen);
        }
        Ok(&mut self.request)
    }

    pub fn set_request(&mut self, request: LaunchRequest) -> std::result::Result<(), LaunchError> {
        *self.request_mut()? = request;
        Ok(())
    }

    pub fn result(&self) -> Option<&LaunchResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&LaunchError> {
        self.last_error.as_ref()
    }

    pub fn transaction_handle(&self) -> Option<TxHash> {
        self.tracker.handle()
    }

    pub fn confirmation_state(&self) -> &ConfirmationState {
        self.tracker.state()
    }

    pub fn min_launch_eth(&self) -> U256 {
        self.min_launch_eth
    }

    pub fn set_min_launch_eth(&mut self, min_wei: U256) {
        self.min_launch_eth = min_wei;
    }

    /// Re-reads the minimum launch value from the contract.
    pub async fn refresh_constraints(&mut self) -> Result<U256> {
        let min_wei = self.chain.min_launch_eth().await?;
        debug!("Minimum launch value refreshed: {} wei", min_wei);
        self.min_launch_eth = min_wei;
        Ok(min_wei)
    }

    pub fn fees(&self) -> FeeBreakdown {
        compute_fees(&self.request.eth_amount)
    }

    pub fn is_form_valid(&self) -> bool {
        validate(&self.request, self.min_launch_eth).is_ok()
    }

    /// Time since the current transaction was handed to the submitter.
    pub fn elapsed(&self) -> Option<Duration> {
        self.submitted_at.map(|t| t.elapsed())
    }

    /// True while a submission or its confirmation is unresolved.
    pub fn is_in_flight(&self) -> bool {
        match self.phase {
            LaunchPhase::Submitting => true,
            LaunchPhase::AwaitingConfirmation => !self.tracker.state().is_terminal(),
            _ => false,
        }
    }

    /// Confirmed, but the receipt carried no token address.
    pub fn is_confirmed_without_result(&self) -> bool {
        self.phase == LaunchPhase::AwaitingConfirmation
            && matches!(self.last_error, Some(LaunchError::ExtractionAmbiguity(_)))
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_confirmed_without_result() {
            "Confirmed but no result"
        } else {
            self.phase.label()
        }
    }

    /// Validates the current request and, if it passes, hands it to the
    /// submitter on a background task.
    pub fn submit(&mut self) -> std::result::Result<(), LaunchError> {
        match self.phase {
            LaunchPhase::Submitting | LaunchPhase::AwaitingConfirmation => {
                warn!("Launch rejected: a launch is already in flight ({})", self.status_label());
                return Err(LaunchError::InFlight);
            }
            LaunchPhase::Succeeded => return Err(LaunchError::AlreadyLaunched),
            LaunchPhase::Idle | LaunchPhase::Validating | LaunchPhase::Failed => {}
        }

        self.phase = LaunchPhase::Validating;
        self.emit(LaunchStatus::Validating);

        let call = match validate(&self.request, self.min_launch_eth) {
            Ok(call) => call,
            Err(e) => {
                info!("Launch parameters rejected: {}", e);
                self.phase = LaunchPhase::Idle;
                self.emit(LaunchStatus::ValidationFailed(e.to_string()));
                let err = LaunchError::Validation(e);
                self.last_error = Some(err.clone());
                return Err(err);
            }
        };

        self.attempt += 1;
        self.tracker.clear();
        self.last_error = None;
        self.submitted = Some(call.clone());
        self.submitted_at = Some(Instant::now());
        self.phase = LaunchPhase::Submitting;
        self.emit(LaunchStatus::Submitting);
        info!(
            "Submitting launch #{} for {} ({}) with {} wei",
            self.attempt, call.name, call.symbol, call.value
        );

        let chain = Arc::clone(&self.chain);
        let events = self.events_tx.clone();
        let attempt = self.attempt;
        tokio::spawn(async move {
            let result = chain.submit(&call).await;
            let _ = events.send(ChainEvent::Submitted { attempt, result });
        });

        Ok(())
    }

    /// Applies every event that has arrived since the last call and returns
    /// the resulting phase. Never waits.
    pub fn poll(&mut self) -> LaunchPhase {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
        self.phase
    }

    /// Waits for the next event and applies it. Returns the resulting phase;
    /// useful when the caller has nothing else to do in the meantime. Returns
    /// immediately when nothing is in flight.
    pub async fn next_event(&mut self) -> LaunchPhase {
        if !self.is_in_flight() {
            return self.poll();
        }
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
        self.poll()
    }

    /// "Launch another": back to a blank form with no result or handle.
    /// Does not and cannot cancel a transaction that was already broadcast.
    pub fn reset(&mut self) -> std::result::Result<(), LaunchError> {
        if self.is_in_flight() {
            return Err(LaunchError::ResetNotAllowed(self.status_label().to_string()));
        }
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
        // Bumping the attempt orphans anything still queued for the old one
        self.attempt += 1;
        self.request = LaunchRequest::default();
        self.tracker.clear();
        self.submitted = None;
        self.submitted_at = None;
        self.result = None;
        self.last_error = None;
        self.phase = LaunchPhase::Idle;
        self.emit(LaunchStatus::Reset);
        Ok(())
    }

    fn apply(&mut self, event: ChainEvent) {
        match event {
            ChainEvent::Submitted { attempt, result } => {
                if attempt != self.attempt || self.phase != LaunchPhase::Submitting {
                    debug!("Discarding stale submission result for attempt {}", attempt);
                    return;
                }
                match result {
                    Ok(handle) => self.on_submitted(handle),
                    Err(e) => {
                        error!("Launch submission failed: {}", e);
                        self.phase = LaunchPhase::Failed;
                        self.emit(LaunchStatus::SubmissionFailed(e.to_string()));
                        self.last_error = Some(LaunchError::Submission(e));
                    }
                }
            }
            ChainEvent::Confirmation { attempt, handle, observation } => {
                if attempt != self.attempt {
                    debug!("Discarding stale confirmation for {:#x}", handle);
                    return;
                }
                if self.tracker.observe(handle, observation) {
                    self.on_settled();
                }
            }
        }
    }

    fn on_submitted(&mut self, handle: TxHash) {
        info!("Launch transaction submitted: {:#x}", handle);
        self.tracker.track(handle);
        self.phase = LaunchPhase::AwaitingConfirmation;
        self.emit(LaunchStatus::Submitted(handle));

        let attempt = self.attempt;
        let source = Arc::clone(&self.chain);
        self.watcher = Some(watch_confirmation(
            source,
            handle,
            self.poll_interval,
            self.events_tx.clone(),
            move |handle, observation| ChainEvent::Confirmation { attempt, handle, observation },
        ));
    }

    fn on_settled(&mut self) {
        self.watcher = None;
        match self.tracker.state().clone() {
            ConfirmationState::Confirmed(handle, receipt) => {
                self.emit(LaunchStatus::Confirmed(handle));
                match extract_token_address(&receipt) {
                    Some(token_address) => {
                        let (name, symbol) = self
                            .submitted
                            .as_ref()
                            .map(|c| (c.name.clone(), c.symbol.clone()))
                            .unwrap_or_default();
                        let result = LaunchResult {
                            token_address,
                            transaction_hash: handle,
                            name,
                            symbol,
                            launched_at: Utc::now(),
                        };
                        info!("Token launched at {}", result.token_address_hex());
                        self.result = Some(result.clone());
                        self.phase = LaunchPhase::Succeeded;
                        self.emit(LaunchStatus::Succeeded(result));
                    }
                    None => {
                        warn!("Transaction {:#x} confirmed but its receipt has no creation log at the expected position", handle);
                        self.last_error = Some(LaunchError::ExtractionAmbiguity(handle));
                        self.emit(LaunchStatus::ConfirmedWithoutResult(handle));
                    }
                }
            }
            ConfirmationState::Failed(handle, message) => {
                error!("Launch transaction {:#x} failed: {}", handle, message);
                self.phase = LaunchPhase::Failed;
                self.emit(LaunchStatus::ConfirmationFailed(handle, message.clone()));
                self.last_error = Some(LaunchError::Confirmation(message));
            }
            ConfirmationState::Unsubmitted | ConfirmationState::Pending(_) => {}
        }
    }

    fn emit(&self, status: LaunchStatus) {
        if let Some(sender) = &self.status_sender {
            let _ = sender.send(status);
        }
    }
}

impl<C: LaunchChain> Drop for LaunchOrchestrator<C> {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LauncherError;
    use crate::launch::ports::{LaunchSubmitter, LauncherReader, ReceiptSource};
    use async_trait::async_trait;
    use ethers::types::{Address, Log, TransactionReceipt, H256, U64};
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    // Submissions succeed or fail on demand; receipts never arrive on their own.
    #[derive(Default)]
    struct QuietChain {
        fail_submits: AtomicBool,
        submitted: AtomicU64,
    }

    #[async_trait]
    impl LauncherReader for QuietChain {
        async fn owner(&self) -> crate::errors::Result<Address> {
            Ok(Address::zero())
        }
        async fn min_launch_eth(&self) -> crate::errors::Result<U256> {
            Ok(default_min_launch_eth())
        }
        async fn total_launches(&self) -> crate::errors::Result<U256> {
            Ok(U256::zero())
        }
        async fn total_fees_collected(&self) -> crate::errors::Result<U256> {
            Ok(U256::zero())
        }
        async fn creator_launch_count(&self, _creator: Address) -> crate::errors::Result<U256> {
            Ok(U256::zero())
        }
        async fn launched_tokens(&self) -> crate::errors::Result<Vec<Address>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl LaunchSubmitter for QuietChain {
        async fn submit(&self, _call: &LaunchCall) -> std::result::Result<TxHash, SubmissionError> {
            let n = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_submits.load(Ordering::SeqCst) {
                return Err(SubmissionError("insufficient funds".to_string()));
            }
            Ok(TxHash::from_low_u64_be(n))
        }
    }

    #[async_trait]
    impl ReceiptSource for QuietChain {
        async fn receipt(&self, _tx_hash: TxHash) -> crate::errors::Result<Option<TransactionReceipt>> {
            Err(LauncherError::Transaction("not indexed yet".to_string()))
        }
    }

    fn launch_receipt(hash: TxHash) -> TransactionReceipt {
        let mut padded = [0u8; 32];
        padded[12..].copy_from_slice(Address::repeat_byte(0xaa).as_bytes());
        TransactionReceipt {
            transaction_hash: hash,
            status: Some(U64::one()),
            logs: vec![Log {
                topics: vec![H256::zero(), H256::zero(), H256::from(padded)],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn orchestrator(chain: &Arc<QuietChain>) -> LaunchOrchestrator<QuietChain> {
        let mut orch = LaunchOrchestrator::new(Arc::clone(chain), Duration::from_millis(10));
        orch.set_request(LaunchRequest::new("DogeMoon", "DOGEM")).unwrap();
        orch
    }

    async fn wait_for(orch: &mut LaunchOrchestrator<QuietChain>, phase: LaunchPhase) {
        for _ in 0..200 {
            if orch.poll() == phase {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("never reached {:?}, stuck in {:?}", phase, orch.phase());
    }

    #[tokio::test]
    async fn events_from_before_a_reset_are_dropped() {
        let chain = Arc::new(QuietChain::default());
        chain.fail_submits.store(true, Ordering::SeqCst);
        let mut orch = orchestrator(&chain);
        orch.submit().unwrap();
        wait_for(&mut orch, LaunchPhase::Failed).await;

        let old_attempt = orch.attempt;
        orch.reset().unwrap();

        let late = TxHash::from_low_u64_be(99);
        orch.events_tx
            .send(ChainEvent::Submitted { attempt: old_attempt, result: Ok(late) })
            .unwrap();
        orch.events_tx
            .send(ChainEvent::Confirmation {
                attempt: old_attempt,
                handle: late,
                observation: Observation::Confirmed(launch_receipt(late)),
            })
            .unwrap();

        assert_eq!(orch.poll(), LaunchPhase::Idle);
        assert_eq!(orch.transaction_handle(), None);
        assert!(orch.result().is_none());
        assert!(orch.last_error().is_none());
    }

    #[tokio::test]
    async fn earlier_attempt_cannot_settle_the_current_handle() {
        let chain = Arc::new(QuietChain::default());
        let mut orch = orchestrator(&chain);
        orch.submit().unwrap();
        wait_for(&mut orch, LaunchPhase::AwaitingConfirmation).await;
        let handle = orch.transaction_handle().unwrap();

        orch.events_tx
            .send(ChainEvent::Confirmation {
                attempt: orch.attempt - 1,
                handle,
                observation: Observation::Failed("reverted".to_string()),
            })
            .unwrap();
        assert_eq!(orch.poll(), LaunchPhase::AwaitingConfirmation);
        assert_eq!(orch.confirmation_state(), &ConfirmationState::Pending(handle));

        orch.events_tx
            .send(ChainEvent::Confirmation {
                attempt: orch.attempt,
                handle,
                observation: Observation::Confirmed(launch_receipt(handle)),
            })
            .unwrap();
        assert_eq!(orch.poll(), LaunchPhase::Succeeded);
        assert_eq!(orch.result().unwrap().token_address, Address::repeat_byte(0xaa));
    }

    #[tokio::test]
    async fn next_event_returns_at_once_when_idle() {
        let chain = Arc::new(QuietChain::default());
        let mut orch = orchestrator(&chain);
        let phase = tokio::time::timeout(Duration::from_millis(200), orch.next_event())
            .await
            .unwrap();
        assert_eq!(phase, LaunchPhase::Idle);
    }
}
