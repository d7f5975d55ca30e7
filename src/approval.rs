//! Approval policies for MCP tool calls.
//!
//! When a run pauses with `requires_action`, the service hands back the
//! pending tool calls and waits for a decision per call. A policy turns each
//! pending call into a decision; the poller submits the batch.
//!
//! # Built-in Implementations
//!
//! - [`ApproveAll`] - approve everything (the demo default)
//! - [`DenyAll`] - deny everything

use std::collections::HashMap;

use async_trait::async_trait;

use crate::types::McpToolCall;

/// Decision for one pending tool call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApprovalDecision {
    /// Let the service execute the call.
    Approve,
    /// Refuse the call; the run continues without its result.
    Deny,
}

/// Reviews pending MCP tool calls.
#[async_trait]
pub trait ApprovalPolicy: Send + Sync {
    /// Decide whether the service may execute `call`.
    async fn review(&self, call: &McpToolCall) -> ApprovalDecision;

    /// Headers attached to approved calls (MCP server authentication).
    fn headers(&self) -> Option<HashMap<String, String>> {
        None
    }
}

/// Approves every pending call.
#[derive(Default)]
pub struct ApproveAll {
    headers: Option<HashMap<String, String>>,
}

impl ApproveAll {
    /// Approve everything, no extra headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a header to every approval.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl ApprovalPolicy for ApproveAll {
    async fn review(&self, call: &McpToolCall) -> ApprovalDecision {
        tracing::info!(
            call_id = %call.id,
            tool = call.name.as_deref().unwrap_or("<unnamed>"),
            server = call.server_label.as_deref().unwrap_or("<unknown>"),
            "approving tool call"
        );
        ApprovalDecision::Approve
    }

    fn headers(&self) -> Option<HashMap<String, String>> {
        self.headers.clone()
    }
}

/// Denies every pending call.
pub struct DenyAll;

#[async_trait]
impl ApprovalPolicy for DenyAll {
    async fn review(&self, call: &McpToolCall) -> ApprovalDecision {
        tracing::warn!(call_id = %call.id, "denying tool call");
        ApprovalDecision::Deny
    }
}
