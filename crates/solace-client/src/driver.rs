// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task plumbing between the conversation state machine and the API client.
//!
//! The driver spawns each exchange on its own tokio task. Callers either
//! join it ([`await_reply`]) or walk away ([`detach`]) -- detaching drops
//! the join handle WITHOUT aborting, so the server-side exchange runs to
//! completion and a later [`resync`] picks up whatever it produced.
//!
//! [`await_reply`]: ConversationDriver::await_reply
//! [`detach`]: ConversationDriver::detach
//! [`resync`]: ConversationDriver::resync

use std::sync::Arc;

use solace_core::types::{EntryId, Message, OwnerId};
use solace_core::SolaceError;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::JournalApi;
use crate::conversation::{Conversation, PendingSend, SendFailure};

struct InFlight {
    pending: PendingSend,
    handle: JoinHandle<Result<Message, SolaceError>>,
}

/// Single consumer of one entry's conversation: owns the state machine
/// and the at-most-one in-flight exchange task.
pub struct ConversationDriver {
    api: Arc<JournalApi>,
    entry_id: EntryId,
    owner_id: OwnerId,
    conversation: Conversation,
    in_flight: Option<InFlight>,
}

impl ConversationDriver {
    pub fn new(api: Arc<JournalApi>, entry_id: EntryId, owner_id: OwnerId) -> Self {
        Self {
            api,
            entry_id,
            owner_id,
            conversation: Conversation::new(entry_id),
            in_flight: None,
        }
    }

    /// The display-side conversation state.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Dismisses the failure indicator from the last settled send.
    pub fn dismiss_failure(&mut self) {
        self.conversation.dismiss_failure();
    }

    /// Starts an exchange on a background task. Refuses while another is
    /// outstanding. Must be called from within a tokio runtime.
    pub fn spawn_send(&mut self, content: &str) -> Result<(), SolaceError> {
        let pending = self.conversation.begin_send(content)?;

        let api = self.api.clone();
        let entry_id = self.entry_id;
        let owner_id = self.owner_id.clone();
        let content = content.to_string();
        let handle =
            tokio::spawn(async move { api.send_message(entry_id, &owner_id, &content).await });

        self.conversation.mark_awaiting(&pending);
        self.in_flight = Some(InFlight { pending, handle });
        Ok(())
    }

    /// Joins the in-flight exchange and settles the conversation with its
    /// outcome.
    pub async fn await_reply(&mut self) -> Result<Message, SendFailure> {
        let Some(InFlight { pending, handle }) = self.in_flight.take() else {
            return Err(SendFailure {
                message: "no exchange in flight".to_string(),
                retriable: false,
            });
        };

        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(SolaceError::Internal(format!("send task failed: {e}"))),
        };
        self.conversation.resolve(pending, outcome)
    }

    /// Walks away from the in-flight exchange. The task keeps running and
    /// the server-side writes complete regardless; its local outcome is
    /// discarded. No-op when nothing is in flight.
    pub fn detach(&mut self) {
        if let Some(InFlight { pending, handle }) = self.in_flight.take() {
            debug!(entry_id = %self.entry_id, "detaching from in-flight exchange");
            drop(handle);
            self.conversation.detach(pending);
        }
    }

    /// Replaces the local transcript with a fresh authoritative server
    /// read. Refused while an exchange is in flight.
    pub async fn resync(&mut self) -> Result<(), SolaceError> {
        if self.in_flight.is_some() {
            return Err(SolaceError::AlreadyInFlight);
        }
        let messages = self.api.list_messages(self.entry_id).await?;
        self.conversation.apply_history(messages);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use solace_config::model::ClientConfig;
    use solace_core::types::Role;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::conversation::SendPhase;

    use super::*;

    fn driver_for(server: &MockServer) -> ConversationDriver {
        let config = ClientConfig {
            server_url: server.uri(),
            owner_id: "local".to_string(),
            request_timeout_secs: 5,
        };
        let api = Arc::new(JournalApi::new(&config).unwrap());
        ConversationDriver::new(api, EntryId(7), OwnerId("local".into()))
    }

    fn assistant_reply_json(content: &str) -> serde_json::Value {
        json!({
            "id": 2,
            "entry_id": 7,
            "owner_id": "local",
            "role": "assistant",
            "content": content,
            "created_at": "2026-02-03T19:22:14.202Z"
        })
    }

    #[tokio::test]
    async fn send_round_trip_updates_conversation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(assistant_reply_json("Do you want to tell me more?")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut driver = driver_for(&server);
        driver.spawn_send("I feel anxious today").unwrap();
        assert!(driver.has_in_flight());
        assert_eq!(driver.conversation().phase(), SendPhase::AwaitingReply);
        assert_eq!(driver.conversation().messages().len(), 1);

        let reply = driver.await_reply().await.unwrap();
        assert_eq!(reply.content, "Do you want to tell me more?");

        assert!(!driver.has_in_flight());
        assert!(driver.conversation().can_send());
        assert_eq!(driver.conversation().messages().len(), 2);
        assert_eq!(driver.conversation().messages()[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn failed_send_surfaces_retriable_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({
                "error": "reply generation failed (upstream_unavailable): timeout",
                "kind": "upstream_unavailable",
                "retriable": true
            })))
            .mount(&server)
            .await;

        let mut driver = driver_for(&server);
        driver.spawn_send("anyone there?").unwrap();
        let failure = driver.await_reply().await.unwrap_err();
        assert!(failure.retriable);

        // The sent message stays visible and a manual retry is allowed.
        assert_eq!(driver.conversation().messages().len(), 1);
        assert!(driver.conversation().can_send());
        assert!(driver.conversation().last_failure().is_some());
    }

    #[tokio::test]
    async fn second_send_while_awaiting_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(assistant_reply_json("slow reply"))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;

        let mut driver = driver_for(&server);
        driver.spawn_send("first").unwrap();

        let err = driver.spawn_send("second").unwrap_err();
        assert!(matches!(err, SolaceError::AlreadyInFlight));

        driver.await_reply().await.unwrap();
        assert!(driver.conversation().can_send());
    }

    #[tokio::test]
    async fn detach_then_resync_reconciles_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(assistant_reply_json("finished after you left"))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "entry_id": 7,
                    "owner_id": "local",
                    "role": "user",
                    "content": "logging off mid-send",
                    "created_at": "2026-02-03T19:22:11.000Z"
                },
                assistant_reply_json("finished after you left")
            ])))
            .mount(&server)
            .await;

        let mut driver = driver_for(&server);
        driver.spawn_send("logging off mid-send").unwrap();
        driver.detach();
        assert!(!driver.has_in_flight());
        assert!(driver.conversation().can_send());

        // Next view: fresh authoritative read shows the exchange completed.
        driver.resync().await.unwrap();
        let messages = driver.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.durable));
        assert_eq!(messages[1].content, "finished after you left");
    }

    #[tokio::test]
    async fn resync_is_refused_while_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/journal/entries/7/messages"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(assistant_reply_json("ok"))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;

        let mut driver = driver_for(&server);
        driver.spawn_send("hold on").unwrap();

        let err = driver.resync().await.unwrap_err();
        assert!(matches!(err, SolaceError::AlreadyInFlight));

        driver.await_reply().await.unwrap();
    }

    #[tokio::test]
    async fn await_reply_without_send_fails_cleanly() {
        let server = MockServer::start().await;
        let mut driver = driver_for(&server);

        let failure = driver.await_reply().await.unwrap_err();
        assert!(!failure.retriable);
        assert!(failure.message.contains("no exchange in flight"));
    }
}
