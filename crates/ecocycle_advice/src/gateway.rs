//! The advice gateway: a FIFO queue drained by one task under rate control.

use crate::{AdviceMetrics, classify_provider_error, compose_advice_prompt};
use ecocycle_core::GenerationParams;
use ecocycle_error::{AdviceError, AdviceErrorKind, AdviceResult, EcocycleResult};
use ecocycle_interface::{AdviceProvider, AdviceRequest};
use ecocycle_rate_limit::{
    Admission, AdmissionPolicy, DenyReason, EcocycleConfig, GatewayConfig, RateGovernor,
    estimate_tokens,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A request waiting in the queue.
struct PendingRequest {
    id: u64,
    prompt: String,
    estimated_tokens: u64,
    responder: oneshot::Sender<AdviceResult<String>>,
}

/// Handle to a running advice gateway.
///
/// Cloning the handle shares the same queue and budgets. The drain task
/// exits once every handle is dropped and the queue is empty.
#[derive(Clone)]
pub struct AdviceGateway {
    tx: mpsc::UnboundedSender<PendingRequest>,
    next_id: Arc<std::sync::atomic::AtomicU64>,
    model: Arc<str>,
}

impl std::fmt::Debug for AdviceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceGateway")
            .field("model", &self.model)
            .field("closed", &self.tx.is_closed())
            .finish_non_exhaustive()
    }
}

impl AdviceGateway {
    /// Spawn the drain task using loaded configuration.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the gateway limits fail validation.
    pub fn spawn(
        provider: Arc<dyn AdviceProvider>,
        config: &EcocycleConfig,
    ) -> EcocycleResult<Self> {
        Self::spawn_with(
            provider,
            config.gateway.clone(),
            config.provider.generation(),
        )
    }

    /// Spawn the drain task with explicit gateway limits and sampling parameters.
    ///
    /// Zero budgets would deny every request forever, so the limits are
    /// validated before the task starts.
    pub fn spawn_with(
        provider: Arc<dyn AdviceProvider>,
        gateway: GatewayConfig,
        generation: GenerationParams,
    ) -> EcocycleResult<Self> {
        gateway.validate()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let model: Arc<str> = Arc::from(provider.model_name());
        let worker = DrainWorker {
            rx,
            governor: RateGovernor::new(&gateway),
            provider,
            generation,
            config: gateway,
            last_processed: None,
            metrics: AdviceMetrics::get(),
        };
        tokio::spawn(worker.run());
        Ok(Self {
            tx,
            next_id: Arc::new(std::sync::atomic::AtomicU64::new(0)),
            model,
        })
    }

    /// Ask for recycling advice about the detected items.
    ///
    /// The question and labels are composed into a single plain-text prompt.
    /// An empty question is rejected without entering the queue.
    pub fn request_advice(&self, prompt: &str, context_labels: &[String]) -> AdviceTicket {
        if prompt.trim().is_empty() {
            return AdviceTicket::failed(AdviceError::new(AdviceErrorKind::InvalidRequest(
                "prompt must not be empty".to_string(),
            )));
        }
        self.submit(compose_advice_prompt(prompt, context_labels))
    }

    /// Queue an already composed prompt.
    pub fn submit(&self, prompt: String) -> AdviceTicket {
        if prompt.trim().is_empty() {
            return AdviceTicket::failed(AdviceError::new(AdviceErrorKind::InvalidRequest(
                "prompt must not be empty".to_string(),
            )));
        }

        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let (responder, rx) = oneshot::channel();
        let pending = PendingRequest {
            id,
            estimated_tokens: estimate_tokens(&prompt),
            prompt,
            responder,
        };
        debug!(id, estimated_tokens = pending.estimated_tokens, "Queueing advice request");

        match self.tx.send(pending) {
            Ok(()) => AdviceTicket::pending(rx),
            Err(_) => AdviceTicket::failed(AdviceError::new(AdviceErrorKind::GatewayClosed)),
        }
    }

    /// Model the gateway's provider answers with.
    pub fn model_name(&self) -> &str {
        &self.model
    }
}

/// Future resolving to the answer for one queued request.
///
/// Dropping the ticket before it resolves cancels the request if it has
/// not been dispatched yet.
#[derive(Debug)]
pub struct AdviceTicket {
    state: TicketState,
}

#[derive(Debug)]
enum TicketState {
    Pending(oneshot::Receiver<AdviceResult<String>>),
    Failed(Option<AdviceError>),
}

impl AdviceTicket {
    fn pending(rx: oneshot::Receiver<AdviceResult<String>>) -> Self {
        Self {
            state: TicketState::Pending(rx),
        }
    }

    fn failed(err: AdviceError) -> Self {
        Self {
            state: TicketState::Failed(Some(err)),
        }
    }
}

impl Future for AdviceTicket {
    type Output = AdviceResult<String>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            TicketState::Pending(rx) => Pin::new(rx).poll(cx).map(|reply| {
                reply.unwrap_or_else(|_| Err(AdviceError::new(AdviceErrorKind::GatewayClosed)))
            }),
            TicketState::Failed(err) => Poll::Ready(Err(err
                .take()
                .unwrap_or_else(|| AdviceError::new(AdviceErrorKind::GatewayClosed)))),
        }
    }
}

/// Owns all rate state; the only place requests are dispatched from.
struct DrainWorker {
    rx: mpsc::UnboundedReceiver<PendingRequest>,
    governor: RateGovernor,
    provider: Arc<dyn AdviceProvider>,
    generation: GenerationParams,
    config: GatewayConfig,
    last_processed: Option<Instant>,
    metrics: &'static AdviceMetrics,
}

/// What became of the head request while it waited for admission.
enum Gate {
    Dispatch,
    Cancelled,
    Rejected(Duration, DenyReason),
}

impl DrainWorker {
    #[instrument(skip(self), fields(model = %self.provider.model_name()))]
    async fn run(mut self) {
        info!("Advice gateway started");
        while let Some(request) = self.rx.recv().await {
            self.process(request).await;
        }
        info!("Advice gateway stopped");
    }

    async fn process(&mut self, mut request: PendingRequest) {
        match self.admit(&mut request).await {
            Gate::Cancelled => {
                debug!(id = request.id, "Caller went away, skipping request");
            }
            Gate::Rejected(wait, reason) => {
                let wait_secs = ceil_secs(wait);
                debug!(id = request.id, %reason, wait_secs, "Rate window full, rejecting");
                self.metrics
                    .record_rejection(self.provider.model_name(), &reason.to_string());
                self.metrics
                    .record_error(self.provider.model_name(), "rate_limited");
                reply(request, Err(AdviceErrorKind::RateLimited { wait_secs }));
                self.last_processed = Some(Instant::now());
            }
            Gate::Dispatch => {
                let result = self.dispatch(&request).await;
                reply(request, result);
                self.last_processed = Some(Instant::now());
            }
        }
    }

    /// Wait out the inter-request delay and backoff until the head request
    /// may be dispatched, rejected, or is abandoned by its caller.
    ///
    /// The delay runs from the end of the previous processed request, so a
    /// slow provider call does not shorten it.
    async fn admit(&mut self, request: &mut PendingRequest) -> Gate {
        loop {
            if request.responder.is_closed() {
                return Gate::Cancelled;
            }

            if let Some(last) = self.last_processed {
                let ready_at = last + self.config.inter_request_delay();
                if Instant::now() < ready_at {
                    if !pause_until(ready_at, &mut request.responder).await {
                        return Gate::Cancelled;
                    }
                    continue;
                }
            }

            let now = Instant::now();
            match self.governor.check(now, request.estimated_tokens) {
                Admission::Admit => return Gate::Dispatch,
                Admission::Deny {
                    wait,
                    reason: DenyReason::Backoff,
                } => {
                    if !pause_until(now + wait, &mut request.responder).await {
                        return Gate::Cancelled;
                    }
                }
                Admission::Deny { wait, reason } => match self.config.admission {
                    AdmissionPolicy::Reject => return Gate::Rejected(wait, reason),
                    AdmissionPolicy::Wait => {
                        debug!(id = request.id, %reason, wait_ms = wait.as_millis() as u64, "Waiting for rate window");
                        if !pause_until(now + wait, &mut request.responder).await {
                            return Gate::Cancelled;
                        }
                    }
                },
            }
        }
    }

    #[instrument(skip(self, request), fields(id = request.id, tokens = request.estimated_tokens))]
    async fn dispatch(&mut self, request: &PendingRequest) -> Result<String, AdviceErrorKind> {
        let started = Instant::now();

        let provider_request = AdviceRequest::new(request.prompt.as_str())
            .with_generation(self.generation.clone());
        let deadline = self.config.request_timeout();
        let outcome = tokio::time::timeout(deadline, self.provider.generate(&provider_request)).await;
        let elapsed = started.elapsed();
        let model = self.provider.model_name().to_string();

        let result = match outcome {
            Ok(Ok(text)) => {
                self.governor.record_dispatch(started, request.estimated_tokens);
                self.metrics.record_request(&model, elapsed.as_secs_f64());
                debug!(elapsed_ms = elapsed.as_millis() as u64, "Advice received");
                Ok(text)
            }
            Ok(Err(err)) if err.kind.is_rate_limited() => {
                self.governor.record_rate_limit_error(Instant::now());
                let wait_secs = ceil_secs(self.governor.current_backoff());
                Err(AdviceErrorKind::ProviderBusy { wait_secs })
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Advice provider failed");
                Err(classify_provider_error(&err))
            }
            Err(_) => {
                warn!(after_secs = deadline.as_secs(), "Advice provider timed out");
                Err(AdviceErrorKind::Timeout {
                    after_secs: deadline.as_secs(),
                })
            }
        };

        if let Err(kind) = &result {
            self.metrics.record_error(&model, kind.label());
        }
        result
    }
}

fn reply(request: PendingRequest, result: Result<String, AdviceErrorKind>) {
    let PendingRequest { id, responder, .. } = request;
    if responder.send(result.map_err(AdviceError::new)).is_err() {
        debug!(id, "Caller dropped before the reply was delivered");
    }
}

/// Sleep until `at`, returning `false` early if the caller goes away.
async fn pause_until(
    at: Instant,
    responder: &mut oneshot::Sender<AdviceResult<String>>,
) -> bool {
    tokio::select! {
        _ = tokio::time::sleep_until(at) => true,
        _ = responder.closed() => false,
    }
}

fn ceil_secs(wait: Duration) -> u64 {
    (wait.as_millis() as u64).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_seconds_round_up() {
        assert_eq!(ceil_secs(Duration::from_millis(59_001)), 60);
        assert_eq!(ceil_secs(Duration::from_millis(2_000)), 2);
        assert_eq!(ceil_secs(Duration::from_millis(1)), 1);
    }
}
