// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Journal store trait for the durable message record.

use async_trait::async_trait;

use crate::error::SolaceError;
use crate::types::{Entry, EntryId, HealthStatus, Message, OwnerId, Role};

/// Durable, ordered record of journal entries and their messages.
///
/// The store exclusively owns persisted messages. Each append is its own
/// committed unit: the user-message write and the later assistant-message
/// write of one exchange are independently durable, so a crash between them
/// leaves the user message intact.
#[async_trait]
pub trait JournalStore: Send + Sync + 'static {
    /// Runs migrations and opens the backing database.
    async fn initialize(&self) -> Result<(), SolaceError>;

    /// Flushes pending writes and releases the backing database.
    async fn close(&self) -> Result<(), SolaceError>;

    /// Reports whether the backing database is reachable.
    async fn health_check(&self) -> Result<HealthStatus, SolaceError>;

    /// Creates a new conversation container for `owner_id`.
    async fn create_entry(
        &self,
        owner_id: &OwnerId,
        title: Option<&str>,
    ) -> Result<Entry, SolaceError>;

    /// Looks up one entry. `Ok(None)` when no such entry exists.
    async fn get_entry(&self, entry_id: EntryId) -> Result<Option<Entry>, SolaceError>;

    /// Lists an owner's entries, newest first.
    async fn list_entries(&self, owner_id: &OwnerId) -> Result<Vec<Entry>, SolaceError>;

    /// Persists one message and returns it with server-assigned id and
    /// timestamp. The timestamp is clamped so it never runs behind the
    /// entry's newest message.
    async fn append_message(
        &self,
        entry_id: EntryId,
        owner_id: &OwnerId,
        role: Role,
        content: &str,
    ) -> Result<Message, SolaceError>;

    /// All messages of an entry ordered by `created_at`, then `id`.
    /// An entry with no messages yields an empty vec, not an error.
    async fn list_messages(&self, entry_id: EntryId) -> Result<Vec<Message>, SolaceError>;
}
