//! Configuration for the demo drivers.
//!
//! Everything is read from environment variables with a default, so loading
//! never fails:
//! - `PROJECT_ENDPOINT` (or `AZURE_AI_PROJECT_ENDPOINT`) - AI Foundry project
//!   endpoint. Defaults to empty, which the drivers reject before making any
//!   network call.
//! - `MODEL_DEPLOYMENT_NAME` (or `AZURE_AI_MODEL_DEPLOYMENT_NAME`) - model
//!   deployment to bind the agent to. Defaults to `gpt-4o-mini`.
//! - `MCP_SERVER_URL` - MCP server the agent searches documentation through.
//!   Defaults to `https://learn.microsoft.com/api/mcp`.
//! - `MCP_SERVER_LABEL` (or `MCP_SERVER_NAME`) - label the service uses to
//!   identify the MCP attachment. Defaults to `microsoft_learn`.

use url::Url;

/// Default model deployment when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default MCP server URL (Microsoft Learn documentation search).
pub const DEFAULT_MCP_SERVER_URL: &str = "https://learn.microsoft.com/api/mcp";

/// Default MCP server label.
pub const DEFAULT_MCP_SERVER_LABEL: &str = "microsoft_learn";

/// Host suffix every AI Foundry project endpoint lives under.
const FOUNDRY_HOST_SUFFIX: &str = "services.ai.azure.com";

/// Resolved driver configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// AI Foundry project endpoint.
    pub endpoint: String,
    /// Model deployment name.
    pub model: String,
    /// MCP server URL.
    pub mcp_server_url: String,
    /// MCP server label.
    pub mcp_server_label: String,
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injected lookup.
    ///
    /// The first variable of each alias pair that resolves to a value wins.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));

        Self {
            endpoint: first(&["PROJECT_ENDPOINT", "AZURE_AI_PROJECT_ENDPOINT"])
                .unwrap_or_default(),
            model: first(&["MODEL_DEPLOYMENT_NAME", "AZURE_AI_MODEL_DEPLOYMENT_NAME"])
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            mcp_server_url: lookup("MCP_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_MCP_SERVER_URL.to_string()),
            mcp_server_label: first(&["MCP_SERVER_LABEL", "MCP_SERVER_NAME"])
                .unwrap_or_else(|| DEFAULT_MCP_SERVER_LABEL.to_string()),
        }
    }

    /// Whether the endpoint points at an AI Foundry project.
    ///
    /// False for anything that does not parse as a URL (including the empty
    /// default) or whose host is not under `services.ai.azure.com`. Drivers
    /// must check this before constructing a client.
    #[must_use]
    pub fn is_foundry_endpoint(&self) -> bool {
        let Ok(url) = Url::parse(&self.endpoint) else {
            return false;
        };
        url.host_str().is_some_and(|host| {
            host == FOUNDRY_HOST_SUFFIX || host.ends_with(&format!(".{FOUNDRY_HOST_SUFFIX}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]);

        assert_eq!(config.endpoint, "");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.mcp_server_url, "https://learn.microsoft.com/api/mcp");
        assert_eq!(config.mcp_server_label, "microsoft_learn");
    }

    #[test]
    fn test_primary_name_wins_over_alias() {
        let config = config_from(&[
            ("PROJECT_ENDPOINT", "https://a.services.ai.azure.com/api/projects/p"),
            ("AZURE_AI_PROJECT_ENDPOINT", "https://b.services.ai.azure.com/api/projects/p"),
        ]);

        assert!(config.endpoint.starts_with("https://a."));
    }

    #[test]
    fn test_alias_used_when_primary_missing() {
        let config = config_from(&[
            ("AZURE_AI_MODEL_DEPLOYMENT_NAME", "gpt-4o"),
            ("MCP_SERVER_NAME", "docs"),
        ]);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.mcp_server_label, "docs");
    }

    #[test]
    fn test_foundry_endpoint_accepted() {
        let config = config_from(&[(
            "PROJECT_ENDPOINT",
            "https://my-resource.services.ai.azure.com/api/projects/my-project",
        )]);

        assert!(config.is_foundry_endpoint());
    }

    #[test]
    fn test_non_foundry_endpoint_rejected() {
        let config = config_from(&[("PROJECT_ENDPOINT", "https://example.com/api")]);
        assert!(!config.is_foundry_endpoint());

        let config = config_from(&[("PROJECT_ENDPOINT", "https://evilservices.ai.azure.com.example.com/x")]);
        assert!(!config.is_foundry_endpoint());
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let config = config_from(&[]);
        assert!(!config.is_foundry_endpoint());
    }
}
