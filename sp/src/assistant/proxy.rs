//! Backend relay responder
//!
//! Posts `{"prompt": ...}` to a developer-controlled endpoint that holds the
//! provider credentials and expects `{"reply": ...}` back.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::{AssistantError, Responder};
use crate::config::AssistantConfig;
use crate::messages;

/// Responder that delegates to a backend relay
pub struct ProxyResponder {
    url: String,
    http: Client,
}

impl ProxyResponder {
    /// Create a responder for `url` using the adapter's HTTP settings
    pub fn new(url: impl Into<String>, config: &AssistantConfig) -> Result<Self, AssistantError> {
        let url = url.into();
        debug!(%url, "ProxyResponder::new: called");

        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(AssistantError::network)?;

        Ok(Self { url, http })
    }

    /// Single POST to the relay; errors are returned, not rendered
    pub async fn try_reply(&self, prompt: &str) -> Result<String, AssistantError> {
        debug!(prompt_len = prompt.len(), "try_reply: called");
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(AssistantError::network)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "try_reply: relay error status");
            return Err(AssistantError::ProxyStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(AssistantError::network)?;
        let data: Value = serde_json::from_str(&body).map_err(AssistantError::invalid_response)?;
        Ok(extract_reply(&data))
    }
}

#[async_trait]
impl Responder for ProxyResponder {
    async fn reply(&self, prompt: &str) -> String {
        match self.try_reply(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, url = %self.url, "Proxy request failed");
                messages::connection_error(&e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}

/// Pick the `reply` field, or show the whole payload
fn extract_reply(data: &Value) -> String {
    match data.get("reply") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(value) if is_truthy(value) => display_value(value),
        _ => data.to_string(),
    }
}

/// Text form of a reply value; arrays are flattened and comma-joined
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
