//! High-level agent handle.
//!
//! Wraps the raw client in the shape the demos want: define an agent once,
//! ask it questions, get text back. Each [`FoundryAgent::ask`] runs the full
//! thread → message → run → poll → read-messages sequence against the
//! service, approving MCP tool calls through the configured policy.

use std::sync::Arc;

use crate::approval::{ApprovalPolicy, ApproveAll};
use crate::client::AgentsClient;
use crate::error::Error;
use crate::mcp::{McpToolDefinition, McpToolResource, RequireApproval, ToolResources};
use crate::runner::{wait_for_run, PollConfig};
use crate::types::{
    Agent, CreateAgent, CreateRun, MessageList, MessageRole, RunStatus, RunUsage, ThreadRun,
};

/// What to create (or find) on the service.
#[derive(Clone, Debug)]
pub struct AgentDefinition {
    /// Agent name, the reuse key.
    pub name: String,
    /// Model deployment name.
    pub model: String,
    /// Instruction prompt.
    pub instructions: String,
    /// MCP attachments.
    pub tools: Vec<McpToolDefinition>,
}

impl AgentDefinition {
    /// Definition with no tools attached.
    #[must_use]
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            instructions: String::new(),
            tools: Vec::new(),
        }
    }

    /// Set the instruction prompt.
    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Attach an MCP server.
    #[must_use]
    pub fn tool(mut self, tool: McpToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }
}

/// One answer from the agent.
#[derive(Clone, Debug)]
pub struct Reply {
    /// Newest assistant message text, empty when the run produced none.
    pub text: String,
    /// Thread the exchange happened on.
    pub thread_id: String,
    /// Run that produced the answer.
    pub run_id: String,
    /// Token usage, when the service reported it.
    pub usage: Option<RunUsage>,
}

/// A hosted agent plus the client-side settings used to run it.
pub struct FoundryAgent {
    client: AgentsClient,
    agent: Agent,
    policy: Arc<dyn ApprovalPolicy>,
    poll: PollConfig,
}

impl FoundryAgent {
    /// Create the agent on the service.
    pub async fn create(client: AgentsClient, definition: AgentDefinition) -> Result<Self, Error> {
        let agent = client
            .create_agent(&CreateAgent {
                model: definition.model,
                name: definition.name,
                instructions: definition.instructions,
                tools: definition.tools,
            })
            .await?;
        tracing::info!(agent_id = %agent.id, "created agent");
        Ok(Self::wrap(client, agent))
    }

    /// Reuse an existing agent by name, creating it on first use.
    ///
    /// The service persists agents across process runs, so repeated
    /// invocations converge on one remote agent.
    pub async fn create_or_reuse(
        client: AgentsClient,
        definition: AgentDefinition,
    ) -> Result<Self, Error> {
        if let Some(agent) = client.find_agent(&definition.name).await? {
            tracing::info!(agent_id = %agent.id, name = %definition.name, "reusing agent");
            return Ok(Self::wrap(client, agent));
        }
        Self::create(client, definition).await
    }

    fn wrap(client: AgentsClient, agent: Agent) -> Self {
        Self {
            client,
            agent,
            policy: Arc::new(ApproveAll::new()),
            poll: PollConfig::default(),
        }
    }

    /// Replace the default approve-everything policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn ApprovalPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the default polling cadence.
    #[must_use]
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Server-assigned agent id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.agent.id
    }

    /// Agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.agent.name.as_deref().unwrap_or("")
    }

    /// Ask on a fresh thread (one conversation per question).
    pub async fn ask(&self, text: &str) -> Result<Reply, Error> {
        let thread = self.client.create_thread().await?;
        tracing::debug!(thread_id = %thread.id, "created thread");
        self.ask_in(&thread.id, text).await
    }

    /// Ask on an existing thread, keeping prior context.
    pub async fn ask_in(&self, thread_id: &str, text: &str) -> Result<Reply, Error> {
        self.client
            .create_message(thread_id, MessageRole::User, text)
            .await?;

        let run = self
            .client
            .create_run(
                thread_id,
                &CreateRun {
                    agent_id: self.agent.id.clone(),
                    tool_resources: self.tool_resources(),
                },
            )
            .await?;
        tracing::debug!(run_id = %run.id, "created run");

        let run = wait_for_run(
            &self.client,
            thread_id,
            run,
            self.policy.as_ref(),
            &self.poll,
        )
        .await?;

        self.reply_from(thread_id, run).await
    }

    /// Delete the remote agent.
    pub async fn delete(self) -> Result<(), Error> {
        self.client.delete_agent(&self.agent.id).await
    }

    /// Approval is requested for every attached MCP server so the poller,
    /// not the service, decides execution.
    fn tool_resources(&self) -> Option<ToolResources> {
        let mcp: Vec<_> = self
            .agent
            .tools
            .iter()
            .filter_map(crate::types::AgentTool::as_mcp)
            .map(|tool| {
                let mut resource = McpToolResource::new(tool.server_label.clone())
                    .require_approval(RequireApproval::Always);
                resource.headers = self.policy.headers();
                resource
            })
            .collect();

        if mcp.is_empty() {
            None
        } else {
            Some(ToolResources { mcp })
        }
    }

    async fn reply_from(&self, thread_id: &str, run: ThreadRun) -> Result<Reply, Error> {
        match run.status {
            RunStatus::Completed => {
                let messages = self.client.list_messages(thread_id).await?;
                Ok(Reply {
                    text: latest_assistant_text(&messages).unwrap_or_default(),
                    thread_id: thread_id.to_string(),
                    run_id: run.id,
                    usage: run.usage,
                })
            }
            status => {
                let (code, message) = run
                    .last_error
                    .map(|e| (Some(e.code), e.message))
                    .unwrap_or((None, format!("run ended as {status}")));
                Err(Error::Run {
                    status,
                    code,
                    message,
                })
            }
        }
    }
}

/// Text of the newest assistant message, if any.
///
/// The service lists messages newest first.
fn latest_assistant_text(messages: &MessageList) -> Option<String> {
    messages
        .data
        .iter()
        .find(|message| message.role == MessageRole::Assistant)
        .map(crate::types::ThreadMessage::text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_assistant_text_skips_user_messages() {
        let json = r#"{
            "data": [
                { "id": "msg_3", "role": "user", "content": [
                    { "type": "text", "text": { "value": "follow-up" } } ] },
                { "id": "msg_2", "role": "assistant", "content": [
                    { "type": "text", "text": { "value": "Here is the summary." } } ] },
                { "id": "msg_1", "role": "assistant", "content": [
                    { "type": "text", "text": { "value": "older answer" } } ] }
            ]
        }"#;

        let messages: MessageList = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            latest_assistant_text(&messages).as_deref(),
            Some("Here is the summary.")
        );
    }

    #[test]
    fn test_latest_assistant_text_empty_thread() {
        let messages: MessageList = serde_json::from_str(r#"{ "data": [] }"#).expect("deserialize");
        assert!(latest_assistant_text(&messages).is_none());
    }

    #[test]
    fn test_definition_builder() {
        let definition = AgentDefinition::new("docs-assistant", "gpt-4o-mini")
            .instructions("You are a documentation assistant.")
            .tool(McpToolDefinition::new(
                "microsoft_learn",
                "https://learn.microsoft.com/api/mcp",
            ));

        assert_eq!(definition.name, "docs-assistant");
        assert_eq!(definition.tools.len(), 1);
        assert_eq!(definition.tools[0].server_label, "microsoft_learn");
    }
}
