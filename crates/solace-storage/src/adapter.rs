// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the JournalStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use solace_config::model::StorageConfig;
use solace_core::types::{Entry, EntryId, HealthStatus, Message, OwnerId, Role};
use solace_core::{JournalStore, SolaceError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed journal store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`JournalStore::initialize`].
pub struct SqliteJournal {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteJournal {
    /// Create a new SqliteJournal with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: JournalStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, SolaceError> {
        self.db.get().ok_or_else(|| SolaceError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl JournalStore for SqliteJournal {
    async fn initialize(&self) -> Result<(), SolaceError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SolaceError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite journal store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), SolaceError> {
        self.db()?.close().await
    }

    async fn health_check(&self) -> Result<HealthStatus, SolaceError> {
        let probe = self
            .db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        match probe {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("probe query failed: {e}"))),
        }
    }

    async fn create_entry(
        &self,
        owner_id: &OwnerId,
        title: Option<&str>,
    ) -> Result<Entry, SolaceError> {
        queries::entries::create_entry(self.db()?, owner_id, title).await
    }

    async fn get_entry(&self, entry_id: EntryId) -> Result<Option<Entry>, SolaceError> {
        queries::entries::get_entry(self.db()?, entry_id).await
    }

    async fn list_entries(&self, owner_id: &OwnerId) -> Result<Vec<Entry>, SolaceError> {
        queries::entries::list_entries(self.db()?, owner_id).await
    }

    async fn append_message(
        &self,
        entry_id: EntryId,
        owner_id: &OwnerId,
        role: Role,
        content: &str,
    ) -> Result<Message, SolaceError> {
        queries::messages::append_message(self.db()?, entry_id, owner_id, role, content).await
    }

    async fn list_messages(&self, entry_id: EntryId) -> Result<Vec<Message>, SolaceError> {
        queries::messages::list_messages(self.db()?, entry_id).await
    }
}
