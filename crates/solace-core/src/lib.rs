// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Solace journal companion.
//!
//! This crate provides the domain types, error taxonomy, and the two trait
//! seams (message store, completion backend) used throughout the Solace
//! workspace. Higher-level crates implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{GenerationFailure, SolaceError};
pub use traits::{CompletionBackend, JournalStore};
pub use types::{Entry, EntryId, HealthStatus, Message, MessageId, OwnerId, Role, TranscriptTurn};
