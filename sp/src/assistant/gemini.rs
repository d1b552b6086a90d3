//! Gemini generate-content client
//!
//! Calls the provider directly with a key from the environment. One request
//! per prompt, no retries, no conversation state.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{AssistantError, Responder};
use crate::config::AssistantConfig;
use crate::messages;

/// Direct provider responder
pub struct GeminiResponder {
    model: String,
    api_key: String,
    base_url: String,
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    http: Client,
}

impl GeminiResponder {
    /// Create a new responder from configuration and a resolved key
    pub fn from_config(config: &AssistantConfig, api_key: impl Into<String>) -> Result<Self, AssistantError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");

        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(AssistantError::network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the generate-content API
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        debug!(%self.model, "build_request_body: called");
        serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }],
                }
            ],
            "generationConfig": {
                "temperature": self.temperature,
                "topP": self.top_p,
                "maxOutputTokens": self.max_output_tokens,
            },
        })
    }

    /// Single POST to the provider; errors are returned, not rendered
    pub async fn try_reply(&self, prompt: &str) -> Result<String, AssistantError> {
        debug!(%self.model, prompt_len = prompt.len(), "try_reply: called");
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(AssistantError::network)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(%status, "try_reply: API error");
            return Err(AssistantError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(AssistantError::network)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(AssistantError::invalid_response)?;
        Ok(first_candidate_text(parsed).unwrap_or_else(|| messages::EMPTY_MODEL_REPLY.to_string()))
    }
}

#[async_trait]
impl Responder for GeminiResponder {
    async fn reply(&self, prompt: &str) -> String {
        match self.try_reply(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, model = %self.model, "Provider request failed");
                messages::connection_error(&e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Concatenated, trimmed text of the first candidate; None when blank
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}
