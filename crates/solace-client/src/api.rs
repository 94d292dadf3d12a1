// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Solace journal API.
//!
//! Thin typed wrapper over reqwest. Server error bodies are mapped to
//! [`SolaceError::Api`] with the `retriable` flag preserved, so callers can
//! distinguish failures worth re-sending from ones that need intervention.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use solace_config::model::ClientConfig;
use solace_core::types::{Entry, EntryId, Message, OwnerId};
use solace_core::SolaceError;
use tracing::debug;

/// Client for the journal server's REST API.
#[derive(Debug, Clone)]
pub struct JournalApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateEntryBody<'a> {
    owner_id: &'a str,
    title: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    owner_id: &'a str,
    content: &'a str,
}

/// Error body shape returned by the server; lenient so a missing
/// `retriable` field degrades to non-retriable instead of a parse error.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    retriable: bool,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

impl JournalApi {
    /// Creates a client for the configured server.
    pub fn new(config: &ClientConfig) -> Result<Self, SolaceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SolaceError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /health -- returns the reported status string.
    pub async fn health(&self) -> Result<String, SolaceError> {
        let url = format!("{}/health", self.base_url);
        let response = self.get(&url).await?;
        let body: HealthBody = Self::parse_json(response).await?;
        Ok(body.status)
    }

    /// Creates a new journal entry.
    pub async fn create_entry(
        &self,
        owner_id: &OwnerId,
        title: Option<&str>,
    ) -> Result<Entry, SolaceError> {
        let url = format!("{}/api/v1/journal/entries", self.base_url);
        let body = CreateEntryBody {
            owner_id: &owner_id.0,
            title,
        };
        let response = self.post(&url, &body).await?;
        Self::parse_json(response).await
    }

    /// Lists the owner's entries, newest first.
    pub async fn list_entries(&self, owner_id: &OwnerId) -> Result<Vec<Entry>, SolaceError> {
        let url = format!("{}/api/v1/journal/entries", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("owner_id", owner_id.0.as_str())])
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;
        Self::parse_json(response).await
    }

    /// Reads the entry's full message history -- the authoritative state
    /// the conversation layer reconciles against.
    pub async fn list_messages(&self, entry_id: EntryId) -> Result<Vec<Message>, SolaceError> {
        let url = format!("{}/api/v1/journal/entries/{entry_id}/messages", self.base_url);
        let response = self.get(&url).await?;
        Self::parse_json(response).await
    }

    /// Runs one exchange: sends the user message and returns the persisted
    /// assistant reply. Blocks for the full server-side pipeline.
    pub async fn send_message(
        &self,
        entry_id: EntryId,
        owner_id: &OwnerId,
        content: &str,
    ) -> Result<Message, SolaceError> {
        let url = format!("{}/api/v1/journal/entries/{entry_id}/messages", self.base_url);
        let body = SendMessageBody {
            owner_id: &owner_id.0,
            content,
        };
        let response = self.post(&url, &body).await?;
        Self::parse_json(response).await
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, SolaceError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::transport_error(url, e))
    }

    async fn post<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, SolaceError> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::transport_error(url, e))
    }

    fn transport_error(url: &str, e: reqwest::Error) -> SolaceError {
        SolaceError::Channel {
            message: format!("request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        }
    }

    /// Decodes a 2xx body, or maps a non-2xx response to [`SolaceError::Api`].
    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SolaceError> {
        let status = response.status();
        debug!(status = status.as_u16(), "server response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => SolaceError::Api {
                    status: status.as_u16(),
                    message: parsed.error,
                    retriable: parsed.retriable,
                },
                Err(_) => SolaceError::Api {
                    status: status.as_u16(),
                    message: if body.is_empty() {
                        status.to_string()
                    } else {
                        body
                    },
                    retriable: status.is_server_error(),
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SolaceError::Internal(format!("failed to parse server response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn api_for(server: &MockServer) -> JournalApi {
        let config = ClientConfig {
            server_url: server.uri(),
            owner_id: "local".to_string(),
            request_timeout_secs: 5,
        };
        JournalApi::new(&config).expect("client should build")
    }

    fn owner() -> OwnerId {
        OwnerId("local".into())
    }

    #[tokio::test]
    async fn create_entry_posts_owner_and_title() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries"))
            .and(body_partial_json(json!({
                "owner_id": "local",
                "title": "Tuesday evening"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 7,
                "owner_id": "local",
                "title": "Tuesday evening",
                "created_at": "2026-02-03T19:22:10.481Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entry = api_for(&server)
            .create_entry(&owner(), Some("Tuesday evening"))
            .await
            .unwrap();
        assert_eq!(entry.id, EntryId(7));
        assert_eq!(entry.title.as_deref(), Some("Tuesday evening"));
    }

    #[tokio::test]
    async fn list_entries_passes_owner_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journal/entries"))
            .and(query_param("owner_id", "local"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 2,
                    "owner_id": "local",
                    "title": null,
                    "created_at": "2026-02-04T08:00:00.000Z"
                },
                {
                    "id": 1,
                    "owner_id": "local",
                    "title": "First",
                    "created_at": "2026-02-03T19:22:10.481Z"
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let entries = api_for(&server).list_entries(&owner()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, EntryId(2));
    }

    #[tokio::test]
    async fn list_messages_parses_ordered_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "entry_id": 7,
                    "owner_id": "local",
                    "role": "user",
                    "content": "I feel anxious today",
                    "created_at": "2026-02-03T19:22:11.000Z"
                },
                {
                    "id": 2,
                    "entry_id": 7,
                    "owner_id": "local",
                    "role": "assistant",
                    "content": "Do you want to tell me more?",
                    "created_at": "2026-02-03T19:22:14.202Z"
                }
            ])))
            .mount(&server)
            .await;

        let messages = api_for(&server).list_messages(EntryId(7)).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, solace_core::types::Role::User);
        assert_eq!(messages[1].content, "Do you want to tell me more?");
    }

    #[tokio::test]
    async fn send_message_returns_assistant_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .and(body_partial_json(json!({
                "owner_id": "local",
                "content": "still spiraling a bit"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 3,
                "entry_id": 7,
                "owner_id": "local",
                "role": "assistant",
                "content": "That sounds heavy. What set it off?",
                "created_at": "2026-02-03T19:25:02.118Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = api_for(&server)
            .send_message(EntryId(7), &owner(), "still spiraling a bit")
            .await
            .unwrap();
        assert_eq!(reply.role, solace_core::types::Role::Assistant);
        assert_eq!(reply.content, "That sounds heavy. What set it off?");
    }

    #[tokio::test]
    async fn typed_error_body_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({
                "error": "reply generation failed (upstream_unavailable): connect refused",
                "kind": "upstream_unavailable",
                "retriable": true
            })))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .send_message(EntryId(7), &owner(), "hello")
            .await
            .unwrap_err();
        match err {
            SolaceError::Api {
                status,
                message,
                retriable,
            } => {
                assert_eq!(status, 502);
                assert!(message.contains("upstream_unavailable"));
                assert!(retriable);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_is_not_retriable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journal/entries/99/messages"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "entry not found: 99",
                "kind": "entry_not_found",
                "retriable": false
            })))
            .mount(&server)
            .await;

        let err = api_for(&server)
            .list_messages(EntryId(99))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SolaceError::Api {
                status: 404,
                retriable: false,
                ..
            }
        ));
        assert!(!err.is_retriable());
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journal/entries"))
            .respond_with(ResponseTemplate::new(500).set_body_string("proxy exploded"))
            .mount(&server)
            .await;

        let err = api_for(&server).list_entries(&owner()).await.unwrap_err();
        match err {
            SolaceError::Api {
                status,
                message,
                retriable,
            } => {
                assert_eq!(status, 500);
                assert!(message.contains("proxy exploded"));
                assert!(retriable, "a 5xx without a body is worth retrying");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn health_reports_status_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "version": "0.1.0"
            })))
            .mount(&server)
            .await;

        let status = api_for(&server).health().await.unwrap();
        assert_eq!(status, "ok");
    }
}
