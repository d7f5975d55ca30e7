//! MCP (Model Context Protocol) attachments for hosted agents.
//!
//! The service executes MCP tool calls itself; this module only describes the
//! attachment the way the service expects it:
//!
//! - [`McpToolDefinition`] - agent-level tool declaration (which server, which
//!   tools)
//! - [`ToolResources`] / [`McpToolResource`] - run-level configuration
//!   (approval mode, headers forwarded to the server)
//!
//! The protocol itself (JSON-RPC, transports, handshakes) stays on the
//! service side.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tool kind the service uses for MCP attachments.
pub const MCP_TOOL_KIND: &str = "mcp";

/// Agent-level declaration of an MCP server attachment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct McpToolDefinition {
    /// Always [`MCP_TOOL_KIND`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Label the service and approval payloads identify this server by.
    pub server_label: String,
    /// Streamable HTTP endpoint of the MCP server.
    pub server_url: String,
    /// Restrict the agent to these tools. Empty means all tools.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
}

impl McpToolDefinition {
    /// Declare an MCP server attachment exposing all of its tools.
    #[must_use]
    pub fn new(server_label: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self {
            kind: MCP_TOOL_KIND.to_string(),
            server_label: server_label.into(),
            server_url: server_url.into(),
            allowed_tools: Vec::new(),
        }
    }

    /// Restrict the attachment to one more named tool.
    #[must_use]
    pub fn allow_tool(mut self, name: impl Into<String>) -> Self {
        self.allowed_tools.push(name.into());
        self
    }
}

/// Approval mode for a server's tool calls within one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequireApproval {
    /// Every call pauses the run with a `requires_action` approval request.
    Always,
    /// Calls execute without pausing the run.
    Never,
}

/// Run-level configuration for one MCP server attachment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct McpToolResource {
    /// Label matching the agent-level [`McpToolDefinition`].
    pub server_label: String,
    /// Headers the service forwards to the MCP server (authentication).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Approval mode for this server's calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_approval: Option<RequireApproval>,
}

impl McpToolResource {
    /// Resource for `server_label` with the service-default approval mode.
    #[must_use]
    pub fn new(server_label: impl Into<String>) -> Self {
        Self {
            server_label: server_label.into(),
            headers: None,
            require_approval: None,
        }
    }

    /// Set the approval mode.
    #[must_use]
    pub fn require_approval(mut self, mode: RequireApproval) -> Self {
        self.require_approval = Some(mode);
        self
    }

    /// Add a header forwarded to the MCP server.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Per-run tool configuration, keyed by tool kind.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ToolResources {
    /// MCP server resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mcp: Vec<McpToolResource>,
}

impl ToolResources {
    /// Resources for a single MCP server.
    #[must_use]
    pub fn mcp(resource: McpToolResource) -> Self {
        Self {
            mcp: vec![resource],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition_wire_shape() {
        let tool = McpToolDefinition::new("microsoft_learn", "https://learn.microsoft.com/api/mcp");

        let json = serde_json::to_value(&tool).expect("serialize");
        assert_eq!(json["type"], "mcp");
        assert_eq!(json["server_label"], "microsoft_learn");
        assert_eq!(json["server_url"], "https://learn.microsoft.com/api/mcp");
        assert!(json.get("allowed_tools").is_none());
    }

    #[test]
    fn test_allowed_tools_serialized_when_set() {
        let tool = McpToolDefinition::new("docs", "https://example.com/mcp")
            .allow_tool("microsoft_docs_search");

        let json = serde_json::to_value(&tool).expect("serialize");
        assert_eq!(json["allowed_tools"][0], "microsoft_docs_search");
    }

    #[test]
    fn test_resource_approval_mode_and_headers() {
        let resource = McpToolResource::new("docs")
            .require_approval(RequireApproval::Always)
            .header("Authorization", "Bearer token");

        let json = serde_json::to_value(ToolResources::mcp(resource)).expect("serialize");
        assert_eq!(json["mcp"][0]["server_label"], "docs");
        assert_eq!(json["mcp"][0]["require_approval"], "always");
        assert_eq!(json["mcp"][0]["headers"]["Authorization"], "Bearer token");
    }

    #[test]
    fn test_default_resources_serialize_empty() {
        let json = serde_json::to_string(&ToolResources::default()).expect("serialize");
        assert_eq!(json, "{}");
    }
}
