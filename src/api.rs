use std::time::Instant;

use reqwest::Client;
use serde_json::{json, Value};

use crate::constants::ASSISTANT_API_URL;
use crate::errors::{ParleyError, ParleyResult};
use crate::session::SessionId;

/// HTTP client for the remote assistant endpoint. The endpoint is fixed
/// per deployment; `with_endpoint` exists so tests can point it at a mock
/// server.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: Client,
    endpoint: String,
}

impl AssistantClient {
    pub fn new() -> Self {
        Self::with_endpoint(ASSISTANT_API_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        AssistantClient {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Sends one user message and returns the assistant's reply text.
    /// Transport failures, non-success statuses, and unexpected body
    /// shapes all surface as errors; the caller collapses them into a
    /// single fallback reply.
    pub async fn send(&self, message: &str, session: &SessionId) -> ParleyResult<String> {
        let payload = json!({
            "message": message,
            "session_id": session.as_str(),
        });

        let started = Instant::now();
        let response = self.http.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        log::info!(
            "POST {} - {} - {}ms",
            self.endpoint,
            status,
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParleyError::api_error(format!("{} - {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ParleyError::malformed(format!("body is not JSON: {}", e)))?;

        extract_reply(&body)
    }
}

impl Default for AssistantClient {
    fn default() -> Self {
        AssistantClient::new()
    }
}

/// Pulls the reply string out of the response body. The deployed service
/// has been observed returning both `{"response": "..."}` and the nested
/// `{"response": {"response": "..."}}` shape.
fn extract_reply(body: &Value) -> ParleyResult<String> {
    match &body["response"] {
        Value::String(reply) => Ok(reply.clone()),
        nested => nested["response"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ParleyError::malformed("body missing \"response\" field")),
    }
}
