//! Run polling.
//!
//! A run advances server-side through `queued` and `in_progress`, pausing at
//! `requires_action` whenever an MCP tool call needs approval. The poller
//! re-fetches the run on a fixed interval, answers approval requests through
//! the configured [`ApprovalPolicy`], and returns once the service reports a
//! terminal status.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::approval::{ApprovalDecision, ApprovalPolicy};
use crate::client::AgentsClient;
use crate::error::Error;
use crate::types::{ThreadRun, ToolApproval};

/// Run-state operations the poller needs.
///
/// Implemented by [`AgentsClient`]; tests substitute scripted mocks.
#[async_trait]
pub trait RunOperations: Send + Sync {
    /// Fetch the current state of a run.
    async fn fetch_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun, Error>;

    /// Submit approval decisions for a blocked run.
    async fn submit_approvals(
        &self,
        thread_id: &str,
        run_id: &str,
        approvals: Vec<ToolApproval>,
    ) -> Result<ThreadRun, Error>;
}

#[async_trait]
impl RunOperations for AgentsClient {
    async fn fetch_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun, Error> {
        self.get_run(thread_id, run_id).await
    }

    async fn submit_approvals(
        &self,
        thread_id: &str,
        run_id: &str,
        approvals: Vec<ToolApproval>,
    ) -> Result<ThreadRun, Error> {
        self.submit_tool_approvals(thread_id, run_id, &approvals).await
    }
}

/// Polling cadence and bound.
#[derive(Clone, Debug)]
pub struct PollConfig {
    /// Fixed sleep between polls.
    pub interval: Duration,
    /// Give up with [`Error::Timeout`] after this long. `None` waits forever.
    pub max_wait: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_wait: None,
        }
    }
}

impl PollConfig {
    /// Near-zero interval with a short bound, for tests.
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            interval: Duration::from_millis(1),
            max_wait: Some(Duration::from_secs(1)),
        }
    }
}

/// Poll `run` until the service reports a terminal status.
///
/// Approval requests are answered through `policy`: every pending call gets
/// one [`ToolApproval`], and the batch is submitted in a single call.
///
/// # Errors
///
/// Propagates service errors, and returns [`Error::Timeout`] when
/// `config.max_wait` elapses first.
pub async fn wait_for_run<S, P>(
    ops: &S,
    thread_id: &str,
    mut run: ThreadRun,
    policy: &P,
    config: &PollConfig,
) -> Result<ThreadRun, Error>
where
    S: RunOperations,
    P: ApprovalPolicy + ?Sized,
{
    let started = Instant::now();

    while !run.status.is_terminal() {
        if let Some(max_wait) = config.max_wait {
            if started.elapsed() >= max_wait {
                return Err(Error::Timeout { waited: max_wait });
            }
        }

        tokio::time::sleep(config.interval).await;
        run = ops.fetch_run(thread_id, &run.id).await?;
        tracing::debug!(run_id = %run.id, status = %run.status, "polled run");

        let pending: Vec<_> = run
            .required_action
            .as_ref()
            .and_then(|action| action.pending_tool_calls())
            .map(|calls| calls.to_vec())
            .unwrap_or_default();

        if !pending.is_empty() {
            let mut approvals = Vec::with_capacity(pending.len());
            for call in &pending {
                let approve = policy.review(call).await == ApprovalDecision::Approve;
                approvals.push(ToolApproval {
                    tool_call_id: call.id.clone(),
                    approve,
                    headers: approve.then(|| policy.headers()).flatten(),
                });
            }

            tracing::info!(run_id = %run.id, count = approvals.len(), "submitting tool approvals");
            run = ops.submit_approvals(thread_id, &run.id, approvals).await?;
        }
    }

    Ok(run)
}
