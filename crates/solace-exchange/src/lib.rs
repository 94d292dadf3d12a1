// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange pipeline for the Solace journal companion.
//!
//! An exchange is the unit of conversation: the user's message is
//! persisted, the entry's full transcript is assembled and sent to the
//! completion backend, and the reply is persisted as the assistant's
//! turn. The [`ExchangeCoordinator`] drives that cycle; [`transcript`]
//! holds the pure projection from stored messages to completion input.

pub mod coordinator;
pub mod locks;
pub mod transcript;

pub use coordinator::{ExchangeCoordinator, ExchangeState};
pub use locks::EntryLocks;
pub use transcript::{assemble_transcript, project_transcript};
