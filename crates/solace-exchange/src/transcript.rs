// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History assembly: projecting stored messages into completion turns.
//!
//! A transcript is derived state. It is rebuilt from the store on every
//! completion call and never cached; a cached copy would silently drop
//! turns committed since it was taken.

use solace_core::types::{EntryId, Message, TranscriptTurn};
use solace_core::{JournalStore, SolaceError};

/// Project an ordered message sequence into role/content turns.
///
/// Pure and deterministic: the same sequence always yields the same
/// transcript, in the same order.
pub fn project_transcript(messages: &[Message]) -> Vec<TranscriptTurn> {
    messages.iter().map(TranscriptTurn::from).collect()
}

/// Build the transcript for an entry as currently stored.
pub async fn assemble_transcript(
    store: &dyn JournalStore,
    entry_id: EntryId,
) -> Result<Vec<TranscriptTurn>, SolaceError> {
    let messages = store.list_messages(entry_id).await?;
    Ok(project_transcript(&messages))
}

#[cfg(test)]
mod tests {
    use solace_core::types::{MessageId, OwnerId, Role};

    use super::*;

    fn message(id: i64, role: Role, content: &str) -> Message {
        Message {
            id: MessageId(id),
            entry_id: EntryId(1),
            owner_id: OwnerId("local".into()),
            role,
            content: content.into(),
            created_at: format!("2026-01-01T00:00:0{id}.000Z"),
        }
    }

    #[test]
    fn projects_roles_and_contents_in_order() {
        let messages = vec![
            message(1, Role::User, "I feel anxious today"),
            message(2, Role::Assistant, "That's understandable."),
            message(3, Role::User, "Thanks"),
        ];

        let transcript = project_transcript(&messages);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0], TranscriptTurn::new(Role::User, "I feel anxious today"));
        assert_eq!(
            transcript[1],
            TranscriptTurn::new(Role::Assistant, "That's understandable.")
        );
        assert_eq!(transcript[2], TranscriptTurn::new(Role::User, "Thanks"));
    }

    #[test]
    fn empty_sequence_projects_to_empty_transcript() {
        assert!(project_transcript(&[]).is_empty());
    }

    #[test]
    fn projection_is_deterministic() {
        let messages = vec![
            message(1, Role::User, "one"),
            message(2, Role::Assistant, "two"),
        ];
        assert_eq!(project_transcript(&messages), project_transcript(&messages));
    }

    #[tokio::test]
    async fn assemble_reads_current_store_state() {
        let journal = solace_test_utils::TestJournal::new().await.unwrap();
        let store = journal.store();
        let owner = OwnerId("local".into());
        let entry = journal.seed_entry(&owner).await.unwrap();

        store
            .append_message(entry.id, &owner, Role::User, "hello")
            .await
            .unwrap();

        let first = assemble_transcript(store.as_ref(), entry.id).await.unwrap();
        let second = assemble_transcript(store.as_ref(), entry.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);

        store
            .append_message(entry.id, &owner, Role::Assistant, "hi")
            .await
            .unwrap();
        let third = assemble_transcript(store.as_ref(), entry.id).await.unwrap();
        assert_eq!(third.len(), 2);
        assert_eq!(third[1].role, Role::Assistant);
    }
}
