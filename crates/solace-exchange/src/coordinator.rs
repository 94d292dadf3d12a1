// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The exchange coordinator: one full user-turn/assistant-turn cycle.
//!
//! Each exchange moves through states:
//! Received -> UserPersisted -> TranscriptBuilt -> Completing -> Persisted,
//! or ends in Failed when the completion service cannot produce a reply.
//!
//! The user-message write and the assistant-message write are separate
//! committed units. A completion failure never rolls back the user's own
//! text; the entry is simply left with a pending unanswered turn, and the
//! next exchange on that entry carries it in the transcript.

use std::sync::Arc;
use std::time::Duration;

use solace_config::model::ExchangeConfig;
use solace_core::types::{EntryId, Message, OwnerId, Role};
use solace_core::{CompletionBackend, GenerationFailure, JournalStore, SolaceError};
use tracing::{debug, info, warn};

use crate::locks::EntryLocks;
use crate::transcript;

/// States in the exchange state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// Request accepted, nothing written yet.
    Received,
    /// User message durably committed.
    UserPersisted,
    /// Transcript assembled, including the just-persisted user message.
    TranscriptBuilt,
    /// Waiting on the completion service.
    Completing,
    /// Assistant reply durably committed.
    Persisted,
    /// Completion failed; the user message remains committed.
    Failed,
}

impl std::fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeState::Received => write!(f, "received"),
            ExchangeState::UserPersisted => write!(f, "user_persisted"),
            ExchangeState::TranscriptBuilt => write!(f, "transcript_built"),
            ExchangeState::Completing => write!(f, "completing"),
            ExchangeState::Persisted => write!(f, "persisted"),
            ExchangeState::Failed => write!(f, "failed"),
        }
    }
}

/// Orchestrates store -> assemble -> complete -> store for one exchange.
///
/// Holds no per-exchange state; every invocation of [`exchange`] is
/// independent. Appends and transcript reads for one entry are serialized
/// through [`EntryLocks`], but the lock is NOT held across the completion
/// call -- a slow upstream must not starve other exchanges on the entry.
///
/// [`exchange`]: ExchangeCoordinator::exchange
pub struct ExchangeCoordinator {
    store: Arc<dyn JournalStore>,
    backend: Arc<dyn CompletionBackend>,
    locks: EntryLocks,
    completion_timeout: Duration,
}

impl ExchangeCoordinator {
    /// Creates a coordinator over the given store and completion backend.
    pub fn new(
        store: Arc<dyn JournalStore>,
        backend: Arc<dyn CompletionBackend>,
        config: &ExchangeConfig,
    ) -> Self {
        Self {
            store,
            backend,
            locks: EntryLocks::new(),
            completion_timeout: Duration::from_secs(config.completion_timeout_secs),
        }
    }

    /// Overrides the completion timeout (for fast timeout tests).
    #[cfg(test)]
    fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    /// Runs one exchange: persist the user message, assemble the
    /// transcript, call the completion service, persist the reply.
    ///
    /// On completion failure the user message stays committed and the
    /// error surfaces as [`SolaceError::GenerationFailed`]; re-sending is
    /// the caller's decision, never taken here.
    pub async fn exchange(
        &self,
        entry_id: EntryId,
        owner_id: &OwnerId,
        content: &str,
    ) -> Result<Message, SolaceError> {
        if content.trim().is_empty() {
            return Err(SolaceError::InvalidInput(
                "message content must not be empty".into(),
            ));
        }
        trace_state(entry_id, ExchangeState::Received);

        let owns = self
            .store
            .get_entry(entry_id)
            .await?
            .is_some_and(|entry| entry.owner_id == *owner_id);
        if !owns {
            return Err(SolaceError::EntryNotFound { id: entry_id });
        }

        let lock = self.locks.lock_for(entry_id);

        // Append and transcript read form one critical section: no other
        // exchange's append may land between this write and this read.
        let (user_message, transcript) = {
            let _guard = lock.lock().await;
            let user_message = self
                .store
                .append_message(entry_id, owner_id, Role::User, content)
                .await?;
            trace_state(entry_id, ExchangeState::UserPersisted);

            let transcript = transcript::assemble_transcript(self.store.as_ref(), entry_id).await?;
            trace_state(entry_id, ExchangeState::TranscriptBuilt);
            (user_message, transcript)
        };

        // Lock released: the completion call may take seconds.
        trace_state(entry_id, ExchangeState::Completing);
        let outcome = tokio::time::timeout(
            self.completion_timeout,
            self.backend.complete(&transcript),
        )
        .await;

        let reply = match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(error)) => {
                trace_state(entry_id, ExchangeState::Failed);
                warn!(
                    entry_id = %entry_id,
                    error = %error,
                    "completion failed; user message remains committed"
                );
                return Err(generation_failure(error));
            }
            Err(_) => {
                trace_state(entry_id, ExchangeState::Failed);
                warn!(
                    entry_id = %entry_id,
                    timeout = ?self.completion_timeout,
                    "completion timed out; user message remains committed"
                );
                return Err(SolaceError::GenerationFailed {
                    reason: GenerationFailure::UpstreamUnavailable,
                    message: format!(
                        "completion call exceeded {:?}",
                        self.completion_timeout
                    ),
                });
            }
        };

        let assistant_message = {
            let _guard = lock.lock().await;
            self.store
                .append_message(entry_id, owner_id, Role::Assistant, &reply)
                .await?
        };
        trace_state(entry_id, ExchangeState::Persisted);
        info!(
            entry_id = %entry_id,
            user_message_id = %user_message.id,
            assistant_message_id = %assistant_message.id,
            "exchange completed"
        );

        Ok(assistant_message)
    }
}

fn trace_state(entry_id: EntryId, state: ExchangeState) {
    debug!(entry_id = %entry_id, state = %state, "exchange state");
}

/// Maps a completion backend failure to the typed exchange outcome.
fn generation_failure(error: SolaceError) -> SolaceError {
    match error {
        SolaceError::Upstream { message, .. } => SolaceError::GenerationFailed {
            reason: GenerationFailure::UpstreamUnavailable,
            message,
        },
        SolaceError::MalformedCompletion { message } => SolaceError::GenerationFailed {
            reason: GenerationFailure::MalformedResponse,
            message,
        },
        other => other,
    }
}
