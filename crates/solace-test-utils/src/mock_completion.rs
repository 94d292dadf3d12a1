// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion backend for deterministic testing.
//!
//! `MockCompletion` implements `CompletionBackend` with pre-configured
//! outcomes, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use solace_core::types::TranscriptTurn;
use solace_core::{CompletionBackend, SolaceError};

/// A mock completion backend that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue; each may be a reply or a typed
/// failure. When the queue is empty, a default "mock response" text is
/// returned. Every transcript passed to [`CompletionBackend::complete`] is
/// captured for later assertions.
pub struct MockCompletion {
    outcomes: Arc<Mutex<VecDeque<Result<String, SolaceError>>>>,
    captured: Arc<Mutex<Vec<Vec<TranscriptTurn>>>>,
    delay: Option<Duration>,
}

impl MockCompletion {
    /// Create a new mock backend with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            captured: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a mock backend pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        let mock = Self::new();
        {
            let outcomes = mock.outcomes.clone();
            let mut queue = outcomes.try_lock().expect("fresh mock is uncontended");
            queue.extend(replies.into_iter().map(Ok));
        }
        mock
    }

    /// Sleep this long before answering each call. Used to exercise
    /// timeout paths and to observe in-flight overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a typed failure.
    pub async fn push_failure(&self, error: SolaceError) {
        self.outcomes.lock().await.push_back(Err(error));
    }

    /// Number of completed `complete` calls so far.
    pub async fn call_count(&self) -> usize {
        self.captured.lock().await.len()
    }

    /// The transcript captured on the `n`-th call (zero-indexed).
    pub async fn transcript_for_call(&self, n: usize) -> Option<Vec<TranscriptTurn>> {
        self.captured.lock().await.get(n).cloned()
    }

    /// Pop the next outcome, or return the default reply.
    async fn next_outcome(&self) -> Result<String, SolaceError> {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletion {
    async fn complete(&self, transcript: &[TranscriptTurn]) -> Result<String, SolaceError> {
        self.captured.lock().await.push(transcript.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_outcome().await
    }
}

#[cfg(test)]
mod tests {
    use solace_core::types::Role;

    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let mock = MockCompletion::new();
        let reply = mock.complete(&[]).await.unwrap();
        assert_eq!(reply, "mock response");
    }

    #[tokio::test]
    async fn queued_outcomes_returned_in_order() {
        let mock = MockCompletion::with_replies(vec!["first".into(), "second".into()]);
        mock.push_failure(SolaceError::upstream_msg("down")).await;

        assert_eq!(mock.complete(&[]).await.unwrap(), "first");
        assert_eq!(mock.complete(&[]).await.unwrap(), "second");
        assert!(mock.complete(&[]).await.is_err());
        // Queue exhausted, falls back to default.
        assert_eq!(mock.complete(&[]).await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn captures_each_transcript() {
        let mock = MockCompletion::new();
        let first = vec![TranscriptTurn::new(Role::User, "hello")];
        let second = vec![
            TranscriptTurn::new(Role::User, "hello"),
            TranscriptTurn::new(Role::Assistant, "mock response"),
            TranscriptTurn::new(Role::User, "more"),
        ];

        mock.complete(&first).await.unwrap();
        mock.complete(&second).await.unwrap();

        assert_eq!(mock.call_count().await, 2);
        assert_eq!(mock.transcript_for_call(0).await.unwrap(), first);
        assert_eq!(mock.transcript_for_call(1).await.unwrap(), second);
        assert!(mock.transcript_for_call(2).await.is_none());
    }

    #[tokio::test]
    async fn delay_is_applied_before_answering() {
        let mock = MockCompletion::new().with_delay(Duration::from_millis(50));
        let started = std::time::Instant::now();
        mock.complete(&[]).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
