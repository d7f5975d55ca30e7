//! Typed REST client for the agents service.
//!
//! One [`AgentsClient`] wraps a project endpoint plus a [`TokenCredential`]
//! and exposes the handful of operations the drivers need: agent lifecycle,
//! threads, messages, runs, and tool-approval submission. All state lives on
//! the service; every method is a single HTTPS round trip.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::TokenCredential;
use crate::error::Error;
use crate::types::{
    Agent, AgentList, AgentThread, CreateAgent, CreateRun, MessageList, MessageRole,
    ThreadMessage, ThreadRun, ToolApproval,
};

/// API version sent with every request.
pub const API_VERSION: &str = "v1";

/// Client for one AI Foundry project.
#[derive(Clone)]
pub struct AgentsClient {
    http: reqwest::Client,
    endpoint: String,
    credential: Arc<dyn TokenCredential>,
}

impl AgentsClient {
    /// Create a client for `endpoint` authenticating through `credential`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, credential: Arc<dyn TokenCredential>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            endpoint,
            credential,
        }
    }

    /// The project endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create an agent.
    pub async fn create_agent(&self, request: &CreateAgent) -> Result<Agent, Error> {
        self.execute(Method::POST, "assistants", Some(request)).await
    }

    /// List the project's agents.
    pub async fn list_agents(&self) -> Result<AgentList, Error> {
        self.execute::<(), _>(Method::GET, "assistants", None).await
    }

    /// Find an agent by name.
    ///
    /// Returns the first match; the service allows duplicate names, creation
    /// order is not guaranteed.
    pub async fn find_agent(&self, name: &str) -> Result<Option<Agent>, Error> {
        let agents = self.list_agents().await?;
        Ok(agents
            .data
            .into_iter()
            .find(|agent| agent.name.as_deref() == Some(name)))
    }

    /// Delete an agent.
    pub async fn delete_agent(&self, agent_id: &str) -> Result<(), Error> {
        let _: DeletionStatus = self
            .execute::<(), _>(Method::DELETE, &format!("assistants/{agent_id}"), None)
            .await?;
        Ok(())
    }

    /// Create an empty conversation thread.
    pub async fn create_thread(&self) -> Result<AgentThread, Error> {
        self.execute(Method::POST, "threads", Some(&serde_json::json!({})))
            .await
    }

    /// Append a text message to a thread.
    pub async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<ThreadMessage, Error> {
        let body = CreateMessage {
            role,
            content: text,
        };
        self.execute(
            Method::POST,
            &format!("threads/{thread_id}/messages"),
            Some(&body),
        )
        .await
    }

    /// Start a run of an agent against a thread.
    pub async fn create_run(&self, thread_id: &str, request: &CreateRun) -> Result<ThreadRun, Error> {
        self.execute(
            Method::POST,
            &format!("threads/{thread_id}/runs"),
            Some(request),
        )
        .await
    }

    /// Fetch the current state of a run.
    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun, Error> {
        self.execute::<(), _>(Method::GET, &format!("threads/{thread_id}/runs/{run_id}"), None)
            .await
    }

    /// Submit approval decisions for a run blocked on `requires_action`.
    pub async fn submit_tool_approvals(
        &self,
        thread_id: &str,
        run_id: &str,
        approvals: &[ToolApproval],
    ) -> Result<ThreadRun, Error> {
        let body = SubmitToolOutputs {
            tool_approvals: approvals,
        };
        self.execute(
            Method::POST,
            &format!("threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            Some(&body),
        )
        .await
    }

    /// List a thread's messages, newest first.
    pub async fn list_messages(&self, thread_id: &str) -> Result<MessageList, Error> {
        self.execute::<(), _>(Method::GET, &format!("threads/{thread_id}/messages"), None)
            .await
    }

    async fn execute<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error> {
        let token = self.credential.token().await?;
        let url = format!("{}/{}?api-version={}", self.endpoint, path, API_VERSION);

        tracing::debug!(method = %method, path, "agents service request");

        let mut request = self.http.request(method, &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(status = %status, body_len = bytes.len(), "agents service response");

        if !status.is_success() {
            return Err(decode_error_body(status, &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Request body for message creation.
#[derive(Serialize)]
struct CreateMessage<'a> {
    role: MessageRole,
    content: &'a str,
}

/// Request body for approval submission.
#[derive(Serialize)]
struct SubmitToolOutputs<'a> {
    tool_approvals: &'a [ToolApproval],
}

/// Response body for agent deletion.
#[derive(Deserialize)]
struct DeletionStatus {
    #[allow(dead_code)]
    id: String,
    #[allow(dead_code)]
    deleted: bool,
}

/// Error envelope the service wraps failures in.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

fn decode_error_body(status: StatusCode, bytes: &[u8]) -> Error {
    let raw = String::from_utf8_lossy(bytes);

    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(bytes) {
        if let Some(body) = envelope.error {
            return Error::Api {
                status,
                code: body.code,
                message: body.message.unwrap_or_else(|| raw.into_owned()),
            };
        }
    }

    Error::Api {
        status,
        code: None,
        message: raw.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_decoded() {
        let body = br#"{"error": {"code": "PermissionDenied", "message": "caller lacks permission"}}"#;

        let err = decode_error_body(StatusCode::FORBIDDEN, body);
        match err {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(code.as_deref(), Some("PermissionDenied"));
                assert_eq!(message, "caller lacks permission");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body_kept_raw() {
        let err = decode_error_body(StatusCode::BAD_GATEWAY, b"upstream unavailable");
        match err {
            Error::Api { status, code, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(code.is_none());
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_error_carries_hint() {
        let body = br#"{"error": {"code": "rate_limit_exceeded", "message": "Requests are throttled"}}"#;

        let err = decode_error_body(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(err.hint().expect("hint").contains("rate limiting"));
    }
}
