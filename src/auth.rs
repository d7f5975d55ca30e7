//! Token credentials for the agents service.
//!
//! The service authenticates with Entra ID bearer tokens. The default
//! credential shells out to the Azure CLI, the same login the original
//! workflow relies on, and caches the token until shortly before expiry.

use async_trait::async_trait;
use serde::Deserialize;
use time::OffsetDateTime;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::error::Error;

/// Resource the token is requested for.
const TOKEN_RESOURCE: &str = "https://ai.azure.com";

/// Refresh this long before the reported expiry.
const EXPIRY_SKEW_SECS: i64 = 300;

/// Source of bearer tokens for service requests.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// A token valid for at least the next request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] when a token cannot be acquired.
    async fn token(&self) -> Result<String, Error>;
}

/// Credential backed by `az account get-access-token`.
pub struct AzureCliCredential {
    resource: String,
    cached: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    token: String,
    expires_on: i64,
}

/// Access-token payload printed by the Azure CLI.
#[derive(Deserialize)]
struct CliToken {
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(default)]
    expires_on: i64,
}

impl AzureCliCredential {
    /// Credential for the AI Foundry resource.
    #[must_use]
    pub fn new() -> Self {
        Self::for_resource(TOKEN_RESOURCE)
    }

    /// Credential for a specific resource URI.
    #[must_use]
    pub fn for_resource(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            cached: Mutex::new(None),
        }
    }

    async fn acquire(&self) -> Result<CliToken, Error> {
        let output = Command::new("az")
            .args([
                "account",
                "get-access-token",
                "--resource",
                self.resource.as_str(),
                "--output",
                "json",
            ])
            .output()
            .await
            .map_err(|e| Error::Credential(format!("failed to invoke the az CLI: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Credential(format!(
                "az CLI exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::Credential(format!("unexpected az CLI output: {e}")))
    }
}

impl Default for AzureCliCredential {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenCredential for AzureCliCredential {
    async fn token(&self) -> Result<String, Error> {
        let mut cached = self.cached.lock().await;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        if let Some(entry) = cached.as_ref() {
            if entry.expires_on - EXPIRY_SKEW_SECS > now {
                return Ok(entry.token.clone());
            }
        }

        tracing::debug!(resource = %self.resource, "acquiring token via az CLI");
        let fresh = self.acquire().await?;
        let token = fresh.access_token.clone();
        *cached = Some(CachedToken {
            token: fresh.access_token,
            expires_on: fresh.expires_on,
        });
        Ok(token)
    }
}

/// Fixed-token credential for tests and pre-acquired tokens.
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    /// Wrap an already-acquired token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticCredential {
    async fn token(&self) -> Result<String, Error> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_token_parses_az_output() {
        let json = r#"{
            "accessToken": "eyJ0eXAi.token",
            "expiresOn": "2026-08-07 13:00:00.000000",
            "expires_on": 1786000000,
            "tokenType": "Bearer"
        }"#;

        let token: CliToken = serde_json::from_str(json).expect("deserialize");
        assert_eq!(token.access_token, "eyJ0eXAi.token");
        assert_eq!(token.expires_on, 1_786_000_000);
    }

    #[test]
    fn test_cli_token_tolerates_missing_expiry() {
        let json = r#"{ "accessToken": "tok" }"#;

        let token: CliToken = serde_json::from_str(json).expect("deserialize");
        assert_eq!(token.expires_on, 0);
    }

    #[tokio::test]
    async fn test_static_credential_returns_token() {
        let credential = StaticCredential::new("fixed");
        assert_eq!(credential.token().await.expect("token"), "fixed");
    }
}
