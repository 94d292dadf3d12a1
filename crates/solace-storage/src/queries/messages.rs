// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message append and listing operations.
//!
//! Messages are append-only. Each append is one committed transaction, so
//! the user-message write and the assistant-message write of a single
//! exchange are independently durable.

use std::str::FromStr;

use rusqlite::params;
use solace_core::SolaceError;

use crate::database::{Database, map_tr_err, now_utc_millis};
use crate::models::{EntryId, Message, MessageId, OwnerId, Role};

/// Append one message and return it with server-assigned id and timestamp.
///
/// The timestamp is clamped to the entry's current maximum `created_at`:
/// wall-clock regressions must not break the non-decreasing ordering key.
/// Equal timestamps fall back to the strictly increasing id.
pub async fn append_message(
    db: &Database,
    entry_id: EntryId,
    owner_id: &OwnerId,
    role: Role,
    content: &str,
) -> Result<Message, SolaceError> {
    let owner = owner_id.0.clone();
    let content = content.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let newest: Option<String> = tx.query_row(
                "SELECT MAX(created_at) FROM messages WHERE entry_id = ?1",
                params![entry_id.0],
                |row| row.get(0),
            )?;
            let now = now_utc_millis();
            let created_at = match newest {
                Some(newest) if newest > now => newest,
                _ => now,
            };
            tx.execute(
                "INSERT INTO messages (entry_id, owner_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![entry_id.0, owner, role.to_string(), content, created_at],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(Message {
                id: MessageId(id),
                entry_id,
                owner_id: OwnerId(owner),
                role,
                content,
                created_at,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// All messages of an entry ordered by `created_at`, then `id`.
pub async fn list_messages(db: &Database, entry_id: EntryId) -> Result<Vec<Message>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, entry_id, owner_id, role, content, created_at
                 FROM messages WHERE entry_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![entry_id.0], |row| {
                let role_text: String = row.get(3)?;
                let role = Role::from_str(&role_text).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(Message {
                    id: MessageId(row.get(0)?),
                    entry_id: EntryId(row.get(1)?),
                    owner_id: OwnerId(row.get(2)?),
                    role,
                    content: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}
