//! Error taxonomy for the agents client.
//!
//! Failures are classified where the information is still structured: the
//! HTTP status code for service responses, and the credential path for
//! authentication. Each class carries an optional operator hint via
//! [`Error::hint`], surfaced by the demo drivers next to the error itself.

use std::time::Duration;

use reqwest::StatusCode;

/// Error type for all client and run operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure (connection, TLS, request build).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the agents service.
    #[error("service error {status}: {message}")]
    Api {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Machine-readable error code from the error envelope, if present.
        code: Option<String>,
        /// Human-readable message from the error envelope or raw body.
        message: String,
    },

    /// Token acquisition failed.
    #[error("credential error: {0}")]
    Credential(String),

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The run reached a terminal status other than `completed`.
    #[error("run ended with status {status}: {message}")]
    Run {
        /// Terminal status reported by the service.
        status: crate::types::RunStatus,
        /// Error code from the run's `last_error`, if any.
        code: Option<String>,
        /// Error message from the run's `last_error`, or a placeholder.
        message: String,
    },

    /// Bounded polling exceeded the configured maximum wait.
    #[error("run did not reach a terminal status within {waited:?}")]
    Timeout {
        /// How long the poller waited before giving up.
        waited: Duration,
    },
}

impl Error {
    /// Operator-facing hint for common failure classes.
    ///
    /// Mirrors the diagnostics a first-time user needs: missing RBAC role,
    /// stale or absent CLI login, a wrong endpoint or deployment name, and
    /// rate limiting.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Api { status, .. } => match status.as_u16() {
                401 | 403 => Some("You need the 'Azure AI User' role on the AI Foundry resource."),
                404 => Some(
                    "Check PROJECT_ENDPOINT and MODEL_DEPLOYMENT_NAME: the project or \
                     deployment was not found.",
                ),
                429 => Some("The service is rate limiting this project. Wait a moment and retry."),
                _ => None,
            },
            Self::Credential(_) => Some("Run 'az login' first to authenticate with Azure."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RunStatus;

    #[test]
    fn test_forbidden_maps_to_role_hint() {
        let err = Error::Api {
            status: StatusCode::FORBIDDEN,
            code: Some("PermissionDenied".to_string()),
            message: "caller lacks permission".to_string(),
        };
        assert!(err.hint().expect("hint").contains("Azure AI User"));
    }

    #[test]
    fn test_credential_maps_to_az_login_hint() {
        let err = Error::Credential("az CLI exited with status 1".to_string());
        assert!(err.hint().expect("hint").contains("az login"));
    }

    #[test]
    fn test_not_found_maps_to_endpoint_hint() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            code: None,
            message: "no such deployment".to_string(),
        };
        assert!(err.hint().expect("hint").contains("PROJECT_ENDPOINT"));
    }

    #[test]
    fn test_rate_limit_maps_to_retry_hint() {
        let err = Error::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            code: Some("rate_limit_exceeded".to_string()),
            message: "slow down".to_string(),
        };
        assert!(err.hint().expect("hint").contains("rate limiting"));
    }

    #[test]
    fn test_run_failure_has_no_hint() {
        let err = Error::Run {
            status: RunStatus::Failed,
            code: None,
            message: "server_error".to_string(),
        };
        assert!(err.hint().is_none());
    }
}
