// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state machine for a single open journal entry.
//!
//! The conversation holds a local display copy of the transcript and
//! enforces the one-exchange-in-flight rule mechanically: [`begin_send`]
//! hands out a non-cloneable [`PendingSend`] token and refuses further
//! sends until [`resolve`] or [`detach`] consumes it. The local copy is
//! display-only; server-assigned ids become authoritative once a
//! round-trip completes, and [`apply_history`] replaces the whole copy
//! with a fresh server read.
//!
//! [`begin_send`]: Conversation::begin_send
//! [`resolve`]: Conversation::resolve
//! [`detach`]: Conversation::detach
//! [`apply_history`]: Conversation::apply_history

use std::fmt;

use solace_core::types::{EntryId, Message, MessageId, Role};
use solace_core::SolaceError;
use tracing::debug;
use uuid::Uuid;

/// Local identity of a displayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalId {
    /// Client-assigned placeholder, valid only until a server round-trip
    /// supplies the real id.
    Provisional(Uuid),
    /// Server-assigned id; authoritative.
    Server(MessageId),
}

/// One message as the client displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedMessage {
    pub local_id: LocalId,
    pub role: Role,
    pub content: String,
    /// False while the message is only an optimistic local echo.
    pub durable: bool,
}

impl From<&Message> for DisplayedMessage {
    fn from(msg: &Message) -> Self {
        Self {
            local_id: LocalId::Server(msg.id),
            role: msg.role,
            content: msg.content.clone(),
            durable: true,
        }
    }
}

/// Send-cycle phase of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    /// No exchange outstanding; sending is allowed.
    Idle,
    /// A send was begun but not yet handed to a transport task.
    Sending,
    /// The exchange is running server-side.
    AwaitingReply,
}

impl fmt::Display for SendPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendPhase::Idle => write!(f, "idle"),
            SendPhase::Sending => write!(f, "sending"),
            SendPhase::AwaitingReply => write!(f, "awaiting_reply"),
        }
    }
}

/// Proof that a send is in flight. Not cloneable: exactly one exists per
/// outstanding exchange, and resolving or detaching consumes it.
#[derive(Debug)]
pub struct PendingSend {
    provisional_id: Uuid,
}

/// A failed send, kept visible until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFailure {
    pub message: String,
    /// Whether re-sending could plausibly succeed.
    pub retriable: bool,
}

/// Display-side state of one open entry's conversation.
#[derive(Debug)]
pub struct Conversation {
    entry_id: EntryId,
    messages: Vec<DisplayedMessage>,
    phase: SendPhase,
    last_failure: Option<SendFailure>,
}

impl Conversation {
    pub fn new(entry_id: EntryId) -> Self {
        Self {
            entry_id,
            messages: Vec::new(),
            phase: SendPhase::Idle,
            last_failure: None,
        }
    }

    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// The displayed transcript, oldest first.
    pub fn messages(&self) -> &[DisplayedMessage] {
        &self.messages
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// True when no exchange is outstanding.
    pub fn can_send(&self) -> bool {
        self.phase == SendPhase::Idle
    }

    /// The failure indicator from the last resolved send, if not dismissed.
    pub fn last_failure(&self) -> Option<&SendFailure> {
        self.last_failure.as_ref()
    }

    /// Clears the failure indicator.
    pub fn dismiss_failure(&mut self) {
        self.last_failure = None;
    }

    /// Starts a send: appends an optimistic user message under a placeholder
    /// id and hands out the in-flight token. Refuses while another exchange
    /// is outstanding, and rejects content that is empty after trimming
    /// before anything is displayed or sent.
    pub fn begin_send(&mut self, content: &str) -> Result<PendingSend, SolaceError> {
        if !self.can_send() {
            return Err(SolaceError::AlreadyInFlight);
        }
        if content.trim().is_empty() {
            return Err(SolaceError::InvalidInput(
                "message content must not be empty".into(),
            ));
        }

        self.last_failure = None;
        let provisional_id = Uuid::new_v4();
        self.messages.push(DisplayedMessage {
            local_id: LocalId::Provisional(provisional_id),
            role: Role::User,
            content: content.to_string(),
            durable: false,
        });
        self.set_phase(SendPhase::Sending);

        Ok(PendingSend { provisional_id })
    }

    /// Marks the pending send as handed off to the server.
    pub fn mark_awaiting(&mut self, _pending: &PendingSend) {
        if self.phase == SendPhase::Sending {
            self.set_phase(SendPhase::AwaitingReply);
        }
    }

    /// Settles the pending send.
    ///
    /// On success the optimistic user message is marked durable (its
    /// placeholder id stands until the next history read) and the returned
    /// assistant message is appended under its authoritative server id. On
    /// failure the user message stays visible and a dismissible failure
    /// indicator is set -- re-sending is the user's decision, never taken
    /// here.
    pub fn resolve(
        &mut self,
        pending: PendingSend,
        outcome: Result<Message, SolaceError>,
    ) -> Result<Message, SendFailure> {
        let result = match outcome {
            Ok(reply) => {
                if let Some(user) = self.provisional_mut(pending.provisional_id) {
                    user.durable = true;
                }
                self.messages.push(DisplayedMessage::from(&reply));
                Ok(reply)
            }
            Err(error) => {
                let failure = SendFailure {
                    message: error.to_string(),
                    retriable: error.is_retriable(),
                };
                debug!(
                    entry_id = %self.entry_id,
                    error = %error,
                    retriable = failure.retriable,
                    "send failed; keeping optimistic message visible"
                );
                self.last_failure = Some(failure.clone());
                Err(failure)
            }
        };

        self.set_phase(SendPhase::Idle);
        result
    }

    /// Abandons the pending send without cancelling anything server-side.
    /// The optimistic message stays visible until the next history read
    /// reconciles it.
    pub fn detach(&mut self, pending: PendingSend) {
        debug!(
            entry_id = %self.entry_id,
            provisional_id = %pending.provisional_id,
            "detaching in-flight send"
        );
        self.set_phase(SendPhase::Idle);
    }

    /// Replaces the displayed transcript with a fresh authoritative server
    /// read. Never merges: the server copy wins wholesale.
    pub fn apply_history(&mut self, messages: Vec<Message>) {
        self.messages = messages.iter().map(DisplayedMessage::from).collect();
    }

    fn provisional_mut(&mut self, id: Uuid) -> Option<&mut DisplayedMessage> {
        self.messages
            .iter_mut()
            .find(|m| m.local_id == LocalId::Provisional(id))
    }

    fn set_phase(&mut self, next: SendPhase) {
        debug!(
            entry_id = %self.entry_id,
            from = %self.phase,
            to = %next,
            "conversation phase"
        );
        self.phase = next;
    }
}
