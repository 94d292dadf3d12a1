// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for exercising the pipeline against real storage.
//!
//! `TestJournal` owns a temp-directory SQLite database wrapped in an
//! initialized [`SqliteJournal`], so integration tests run against the
//! production storage path without touching the developer's filesystem.

use std::sync::Arc;

use solace_config::model::StorageConfig;
use solace_core::types::{Entry, OwnerId};
use solace_core::{JournalStore, SolaceError};
use solace_storage::SqliteJournal;

/// An initialized journal store backed by a temporary database.
///
/// The temp directory lives as long as the harness; dropping it removes
/// the database files.
pub struct TestJournal {
    store: Arc<SqliteJournal>,
    _temp_dir: tempfile::TempDir,
}

impl TestJournal {
    /// Create and initialize a fresh journal store in a temp directory.
    pub async fn new() -> Result<Self, SolaceError> {
        let temp_dir = tempfile::TempDir::new().map_err(SolaceError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let store = SqliteJournal::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        store.initialize().await?;

        Ok(Self {
            store: Arc::new(store),
            _temp_dir: temp_dir,
        })
    }

    /// The shared store handle.
    pub fn store(&self) -> Arc<SqliteJournal> {
        self.store.clone()
    }

    /// Convenience: create an untitled entry for `owner`.
    pub async fn seed_entry(&self, owner: &OwnerId) -> Result<Entry, SolaceError> {
        self.store.create_entry(owner, None).await
    }
}
