//! Wire types of the agents service.
//!
//! Every entity here is owned, created, and destroyed by the remote service;
//! the client only holds identifiers for the duration of one process run:
//!
//! - [`Agent`]: a named, model-bound conversational entity
//! - [`AgentThread`]: a server-side conversation history container
//! - [`ThreadMessage`]: one role-tagged message appended to a thread
//! - [`ThreadRun`]: one execution of an agent against a thread
//! - [`RunStatus`]: the run's polled lifecycle status
//! - [`ToolApproval`]: the decision record submitted to unblock a run

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::mcp::McpToolDefinition;

/// A configured agent hosted by the service.
///
/// Persists remotely across process runs; the reuse driver finds it again by
/// name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    /// Server-assigned identifier.
    pub id: String,
    /// Agent name, used for lookup on reuse.
    #[serde(default)]
    pub name: Option<String>,
    /// Model deployment the agent is bound to.
    pub model: String,
    /// Instruction prompt.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Tools attached at the agent level.
    #[serde(default)]
    pub tools: Vec<AgentTool>,
}

/// A tool attached to an agent, as the service reports it.
///
/// Agents in the same project may carry tool kinds this client never
/// creates; those are preserved as raw JSON rather than failing the listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentTool {
    /// An MCP server attachment.
    Mcp(McpToolDefinition),
    /// Any other tool kind.
    Other(serde_json::Value),
}

impl AgentTool {
    /// The MCP attachment, if this is one.
    #[must_use]
    pub fn as_mcp(&self) -> Option<&McpToolDefinition> {
        match self {
            Self::Mcp(tool) => Some(tool),
            Self::Other(_) => None,
        }
    }
}

/// Request body for agent creation.
#[derive(Clone, Debug, Serialize)]
pub struct CreateAgent {
    /// Model deployment name.
    pub model: String,
    /// Agent name.
    pub name: String,
    /// Instruction prompt.
    pub instructions: String,
    /// Tools attached at the agent level.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<McpToolDefinition>,
}

/// Paged agent listing.
#[derive(Clone, Debug, Deserialize)]
pub struct AgentList {
    /// Agents in this page.
    pub data: Vec<Agent>,
    /// Whether more pages exist.
    #[serde(default)]
    pub has_more: bool,
}

/// A conversation thread.
#[derive(Clone, Debug, Deserialize)]
pub struct AgentThread {
    /// Server-assigned identifier.
    pub id: String,
}

/// Message author role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// End-user input.
    User,
    /// Agent output.
    Assistant,
}

/// One content item of a thread message.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    /// Plain text content.
    Text {
        /// The text payload.
        text: MessageText,
    },
    /// Content kinds this client does not render (images, files).
    #[serde(other)]
    Unsupported,
}

/// Text payload of a message content item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageText {
    /// The text value.
    pub value: String,
}

/// A message stored on a thread.
#[derive(Clone, Debug, Deserialize)]
pub struct ThreadMessage {
    /// Server-assigned identifier.
    pub id: String,
    /// Author role.
    pub role: MessageRole,
    /// Content items.
    #[serde(default)]
    pub content: Vec<MessageContent>,
    /// Creation time as a unix timestamp.
    #[serde(default)]
    pub created_at: i64,
}

impl ThreadMessage {
    /// Concatenated text of all text content items.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                MessageContent::Text { text } => Some(text.value.as_str()),
                MessageContent::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Paged message listing.
#[derive(Clone, Debug, Deserialize)]
pub struct MessageList {
    /// Messages in this page.
    pub data: Vec<ThreadMessage>,
}

/// Lifecycle status of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Accepted, not yet started.
    Queued,
    /// Executing.
    InProgress,
    /// Blocked on a client action (tool approval).
    RequiresAction,
    /// Cancellation requested, not yet effective.
    Cancelling,
    /// Cancelled before completion.
    Cancelled,
    /// Ended with a service-reported error.
    Failed,
    /// Ended successfully.
    Completed,
    /// Exceeded the service-side deadline.
    Expired,
}

impl RunStatus {
    /// Whether the service will make no further transitions for this run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            Self::Queued | Self::InProgress | Self::RequiresAction | Self::Cancelling
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Completed => "completed",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// Action the service is waiting on before the run can continue.
#[derive(Clone, Debug, Deserialize)]
pub struct RequiredAction {
    /// Action kind, `submit_tool_approval` for MCP approval requests.
    #[serde(rename = "type")]
    pub kind: String,
    /// Approval payload, present when `kind` is `submit_tool_approval`.
    #[serde(default)]
    pub submit_tool_approval: Option<SubmitToolApproval>,
}

impl RequiredAction {
    /// Pending tool calls awaiting approval, if this is an approval request.
    #[must_use]
    pub fn pending_tool_calls(&self) -> Option<&[McpToolCall]> {
        if self.kind != "submit_tool_approval" {
            return None;
        }
        self.submit_tool_approval
            .as_ref()
            .map(|action| action.tool_calls.as_slice())
    }
}

/// Tool-approval payload nested in a required action.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmitToolApproval {
    /// Calls the service wants approved or denied.
    #[serde(default)]
    pub tool_calls: Vec<McpToolCall>,
}

/// A tool call pending approval.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct McpToolCall {
    /// Call identifier, echoed back in the approval.
    pub id: String,
    /// Call kind, `mcp` for MCP tool invocations.
    #[serde(rename = "type")]
    pub kind: String,
    /// Tool name on the MCP server.
    #[serde(default)]
    pub name: Option<String>,
    /// JSON-encoded tool arguments.
    #[serde(default)]
    pub arguments: Option<String>,
    /// Label of the MCP server the call targets.
    #[serde(default)]
    pub server_label: Option<String>,
}

/// Approval decision submitted back to the service.
#[derive(Clone, Debug, Serialize)]
pub struct ToolApproval {
    /// The pending call this decision is for.
    pub tool_call_id: String,
    /// Approve or deny execution.
    pub approve: bool,
    /// Headers forwarded to the MCP server with the approved call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// Error reported by a failed run.
#[derive(Clone, Debug, Deserialize)]
pub struct RunError {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Token accounting for a finished run.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct RunUsage {
    /// Tokens consumed by the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens produced by the model.
    #[serde(default)]
    pub completion_tokens: u64,
    /// Total of both.
    #[serde(default)]
    pub total_tokens: u64,
}

/// One execution of an agent against a thread.
#[derive(Clone, Debug, Deserialize)]
pub struct ThreadRun {
    /// Server-assigned identifier.
    pub id: String,
    /// Current lifecycle status.
    pub status: RunStatus,
    /// Pending client action, set while `status` is `requires_action`.
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    /// Error details, set when `status` is `failed`.
    #[serde(default)]
    pub last_error: Option<RunError>,
    /// Token usage, set on terminal statuses.
    #[serde(default)]
    pub usage: Option<RunUsage>,
}

/// Request body for run creation.
#[derive(Clone, Debug, Serialize)]
pub struct CreateRun {
    /// Agent to execute.
    #[serde(rename = "assistant_id")]
    pub agent_id: String,
    /// Per-run tool configuration (MCP approval mode and headers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<crate::mcp::ToolResources>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Expired.is_terminal());

        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(!RunStatus::RequiresAction.is_terminal());
        assert!(!RunStatus::Cancelling.is_terminal());
    }

    #[test]
    fn test_run_status_wire_names() {
        let status: RunStatus = serde_json::from_str("\"requires_action\"").expect("deserialize");
        assert_eq!(status, RunStatus::RequiresAction);
        assert_eq!(status.to_string(), "requires_action");
    }

    #[test]
    fn test_run_with_approval_request_deserializes() {
        let json = r#"{
            "id": "run_1",
            "status": "requires_action",
            "required_action": {
                "type": "submit_tool_approval",
                "submit_tool_approval": {
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "mcp",
                        "name": "microsoft_docs_search",
                        "arguments": "{\"query\": \"azure functions\"}",
                        "server_label": "microsoft_learn"
                    }]
                }
            }
        }"#;

        let run: ThreadRun = serde_json::from_str(json).expect("deserialize");
        let calls = run
            .required_action
            .as_ref()
            .and_then(RequiredAction::pending_tool_calls)
            .expect("pending calls");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].server_label.as_deref(), Some("microsoft_learn"));
    }

    #[test]
    fn test_unrelated_required_action_has_no_pending_calls() {
        let json = r#"{
            "id": "run_1",
            "status": "requires_action",
            "required_action": { "type": "submit_tool_outputs" }
        }"#;

        let run: ThreadRun = serde_json::from_str(json).expect("deserialize");
        assert!(run
            .required_action
            .as_ref()
            .and_then(RequiredAction::pending_tool_calls)
            .is_none());
    }

    #[test]
    fn test_message_text_concatenation() {
        let json = r#"{
            "id": "msg_1",
            "role": "assistant",
            "created_at": 1730000000,
            "content": [
                { "type": "text", "text": { "value": "First." } },
                { "type": "image_file", "image_file": { "file_id": "f1" } },
                { "type": "text", "text": { "value": "Second." } }
            ]
        }"#;

        let message: ThreadMessage = serde_json::from_str(json).expect("deserialize");
        assert_eq!(message.text(), "First.\nSecond.");
    }

    #[test]
    fn test_agent_with_unknown_tool_kind_deserializes() {
        let json = r#"{
            "id": "asst_1",
            "name": "docs-assistant",
            "model": "gpt-4o-mini",
            "tools": [
                { "type": "code_interpreter" },
                { "type": "mcp",
                  "server_label": "microsoft_learn",
                  "server_url": "https://learn.microsoft.com/api/mcp" }
            ]
        }"#;

        let agent: Agent = serde_json::from_str(json).expect("deserialize");
        let mcp: Vec<_> = agent.tools.iter().filter_map(AgentTool::as_mcp).collect();
        assert_eq!(mcp.len(), 1);
        assert_eq!(mcp[0].server_label, "microsoft_learn");
    }

    #[test]
    fn test_tool_approval_omits_empty_headers() {
        let approval = ToolApproval {
            tool_call_id: "call_1".to_string(),
            approve: true,
            headers: None,
        };

        let json = serde_json::to_string(&approval).expect("serialize");
        assert!(!json.contains("headers"));
        assert!(json.contains("\"approve\":true"));
    }
}
