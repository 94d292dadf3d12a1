// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the conversation exchange pipeline.

use strum::Display;
use thiserror::Error;

use crate::types::EntryId;

/// Why a completion could not be generated for an otherwise valid exchange.
///
/// Carried by [`SolaceError::GenerationFailed`] so callers can distinguish
/// failures worth re-sending from failures that need intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationFailure {
    /// Network failure, timeout, or non-2xx status from the completion
    /// service. Retriable by the caller's policy; never retried internally.
    UpstreamUnavailable,
    /// The completion service answered 2xx but the body was missing the
    /// expected content, or the content was empty after trimming.
    /// Non-retriable without intervention.
    MalformedResponse,
}

impl GenerationFailure {
    pub fn is_retriable(self) -> bool {
        matches!(self, GenerationFailure::UpstreamUnavailable)
    }
}

/// The primary error type used across all Solace crates.
#[derive(Debug, Error)]
pub enum SolaceError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected before any write occurred.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The referenced entry does not exist (or belongs to another owner).
    #[error("entry not found: {id}")]
    EntryNotFound { id: EntryId },

    /// Storage backend errors (database connection, query failure, corrupt row).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The completion service could not be reached or answered non-2xx.
    #[error("completion service unavailable: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The completion service answered, but not with usable content.
    #[error("malformed completion response: {message}")]
    MalformedCompletion { message: String },

    /// An exchange reached the completion step and could not produce a reply.
    /// The user message is already durably recorded when this surfaces.
    #[error("reply generation failed ({reason}): {message}")]
    GenerationFailed {
        reason: GenerationFailure,
        message: String,
    },

    /// A send was attempted while another exchange was still in flight.
    #[error("an exchange is already in flight for this conversation")]
    AlreadyInFlight,

    /// Transport errors at the HTTP boundary (bind failure, serve failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Server-side error surfaced through the HTTP API.
    #[error("api error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        retriable: bool,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SolaceError {
    /// Wraps any storage-layer failure.
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        SolaceError::Storage {
            source: Box::new(source),
        }
    }

    /// Upstream failure with a causing error attached.
    pub fn upstream(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SolaceError::Upstream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Upstream failure described by message alone (e.g. a bad status code).
    pub fn upstream_msg(message: impl Into<String>) -> Self {
        SolaceError::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Whether re-issuing the same operation could plausibly succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            SolaceError::Upstream { .. } | SolaceError::Timeout { .. } => true,
            SolaceError::GenerationFailed { reason, .. } => reason.is_retriable(),
            SolaceError::Api { retriable, .. } => *retriable,
            _ => false,
        }
    }
}
