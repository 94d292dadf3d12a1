// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-entry append serialization.
//!
//! Appends within one entry must not interleave with transcript reads of
//! another exchange on the same entry; exchanges on different entries are
//! fully independent. One async mutex per entry gives exactly that
//! granularity. The registry grows by one `Arc<Mutex>` per entry ever
//! exchanged on and entries are never deleted, so no eviction is needed.

use std::sync::Arc;

use dashmap::DashMap;
use solace_core::types::EntryId;
use tokio::sync::Mutex;

/// Registry of per-entry locks, cheap to clone and share across tasks.
#[derive(Clone, Default)]
pub struct EntryLocks {
    locks: Arc<DashMap<EntryId, Arc<Mutex<()>>>>,
}

impl EntryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding appends and transcript reads for `entry_id`.
    pub fn lock_for(&self, entry_id: EntryId) -> Arc<Mutex<()>> {
        self.locks
            .entry(entry_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
