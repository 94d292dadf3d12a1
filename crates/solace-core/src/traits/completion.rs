// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion backend trait for the external text-generation boundary.

use async_trait::async_trait;

use crate::error::SolaceError;
use crate::types::TranscriptTurn;

/// The boundary that turns a transcript into an assistant reply.
///
/// The call is atomic from the caller's point of view: either a complete
/// reply string or a typed failure. No partial or streaming results.
#[async_trait]
pub trait CompletionBackend: Send + Sync + 'static {
    /// Generates a reply to the given ordered transcript.
    ///
    /// Returns the trimmed content of the first choice. Fails with
    /// [`SolaceError::Upstream`] on network/timeout/non-2xx conditions and
    /// [`SolaceError::MalformedCompletion`] when the response is well-formed
    /// but carries no usable content. Never retries internally.
    async fn complete(&self, transcript: &[TranscriptTurn]) -> Result<String, SolaceError>;
}
