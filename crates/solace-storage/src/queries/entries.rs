// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry CRUD operations.
//!
//! Entries are created once and never mutated, so there is no update path.

use rusqlite::params;
use solace_core::SolaceError;

use crate::database::{Database, map_tr_err, now_utc_millis};
use crate::models::{Entry, EntryId, OwnerId};

/// Create a new entry and return it with its server-assigned id.
pub async fn create_entry(
    db: &Database,
    owner_id: &OwnerId,
    title: Option<&str>,
) -> Result<Entry, SolaceError> {
    let owner = owner_id.0.clone();
    let title = title.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let created_at = now_utc_millis();
            conn.execute(
                "INSERT INTO entries (owner_id, title, created_at) VALUES (?1, ?2, ?3)",
                params![owner, title, created_at],
            )?;
            Ok(Entry {
                id: EntryId(conn.last_insert_rowid()),
                owner_id: OwnerId(owner),
                title,
                created_at,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Get an entry by id. `Ok(None)` when no such entry exists.
pub async fn get_entry(db: &Database, entry_id: EntryId) -> Result<Option<Entry>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, title, created_at FROM entries WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![entry_id.0], |row| {
                Ok(Entry {
                    id: EntryId(row.get(0)?),
                    owner_id: OwnerId(row.get(1)?),
                    title: row.get(2)?,
                    created_at: row.get(3)?,
                })
            });
            match result {
                Ok(entry) => Ok(Some(entry)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List an owner's entries, newest first.
pub async fn list_entries(db: &Database, owner_id: &OwnerId) -> Result<Vec<Entry>, SolaceError> {
    let owner = owner_id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, title, created_at FROM entries
                 WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![owner], |row| {
                Ok(Entry {
                    id: EntryId(row.get(0)?),
                    owner_id: OwnerId(row.get(1)?),
                    title: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(map_tr_err)
}
