//! foundry-agents - a client SDK for Azure AI Foundry hosted agents.
//!
//! This crate drives agents hosted by an AI Foundry project: create or reuse
//! a named agent with an MCP documentation-search tool attached, run it
//! against a conversation thread, poll the run to completion while answering
//! tool-approval requests, and read the assistant's reply. All agent, thread,
//! and run state lives on the service; the crate holds identifiers only.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use foundry_agents::{
//!     AgentDefinition, AgentsClient, AzureCliCredential, Config, FoundryAgent,
//!     McpToolDefinition,
//! };
//!
//! let config = Config::from_env();
//! let client = AgentsClient::new(&config.endpoint, Arc::new(AzureCliCredential::new()));
//!
//! let agent = FoundryAgent::create(
//!     client,
//!     AgentDefinition::new("docs-assistant", &config.model)
//!         .instructions("You are a helpful documentation assistant.")
//!         .tool(McpToolDefinition::new(
//!             &config.mcp_server_label,
//!             &config.mcp_server_url,
//!         )),
//! )
//! .await?;
//!
//! let reply = agent.ask("What is Azure Functions?").await?;
//! println!("{}", reply.text);
//! ```

#![forbid(unsafe_code)]

mod agent;
mod approval;
mod auth;
mod client;
mod config;
mod error;
pub mod mcp;
pub mod runner;
mod types;

pub use agent::{AgentDefinition, FoundryAgent, Reply};
pub use approval::{ApprovalDecision, ApprovalPolicy, ApproveAll, DenyAll};
pub use auth::{AzureCliCredential, StaticCredential, TokenCredential};
pub use client::{AgentsClient, API_VERSION};
pub use config::Config;
pub use error::Error;
pub use mcp::{McpToolDefinition, McpToolResource, RequireApproval, ToolResources};
pub use runner::{wait_for_run, PollConfig, RunOperations};
pub use types::{
    Agent, AgentList, AgentThread, AgentTool, CreateAgent, CreateRun, McpToolCall,
    MessageContent, MessageList, MessageRole, RequiredAction, RunError, RunStatus, RunUsage,
    ThreadMessage, ThreadRun, ToolApproval,
};
