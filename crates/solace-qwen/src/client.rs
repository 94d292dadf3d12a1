// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Qwen chat-completions API.
//!
//! Provides [`QwenClient`], the [`CompletionBackend`] implementation behind
//! every exchange. One POST per call, bearer-token auth, explicit timeout.
//! Failures split into retriable (network, timeout, non-2xx) and
//! non-retriable (2xx with unusable content); the client itself never
//! retries -- retry policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use solace_config::model::QwenConfig;
use solace_core::types::{Role, TranscriptTurn};
use solace_core::{CompletionBackend, SolaceError};
use tracing::debug;

use crate::types::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse};

/// HTTP client for Qwen API communication.
///
/// Holds a pooled `reqwest` client with the authorization header and
/// request timeout baked in at construction.
#[derive(Debug, Clone)]
pub struct QwenClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl QwenClient {
    /// Creates a new Qwen API client from configuration.
    ///
    /// Fails when no API key is configured or the key cannot be carried
    /// in an HTTP header.
    pub fn new(config: &QwenConfig) -> Result<Self, SolaceError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            SolaceError::Config(
                "qwen.api_key is not set (configure it or export SOLACE_QWEN_API_KEY)".into(),
            )
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| SolaceError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SolaceError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// One-shot completion for a single standalone prompt.
    ///
    /// Degenerate use of the same endpoint with a one-turn transcript and
    /// no persistence; callers outside the exchange pipeline (assessment
    /// summaries and the like) go through this.
    pub async fn complete_once(&self, prompt: &str) -> Result<String, SolaceError> {
        let transcript = [TranscriptTurn::new(Role::User, prompt)];
        self.complete(&transcript).await
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for QwenClient {
    async fn complete(&self, transcript: &[TranscriptTurn]) -> Result<String, SolaceError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: transcript.iter().map(ChatMessage::from).collect(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| SolaceError::upstream(format!("completion request failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, turns = transcript.len(), "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api_err) => format!("completion API error ({status}): {}", api_err.error.message),
                Err(_) => format!("completion API returned {status}: {body}"),
            };
            return Err(SolaceError::upstream_msg(message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SolaceError::upstream(format!("failed to read response body: {e}"), e))?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            SolaceError::MalformedCompletion {
                message: format!("failed to parse completion response: {e}"),
            }
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(SolaceError::MalformedCompletion {
                message: "completion response carried no usable content".into(),
            });
        }

        Ok(content)
    }
}
