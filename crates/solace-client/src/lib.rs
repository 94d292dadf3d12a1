// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client reconciliation layer for the Solace journal companion.
//!
//! Three pieces: [`JournalApi`] talks HTTP to the server, [`Conversation`]
//! is the pure send-cycle state machine enforcing one exchange in flight,
//! and [`ConversationDriver`] wires the two together with a detachable
//! tokio task per exchange. The local transcript is display-only; the
//! server copy is authoritative and wins on every reconciling read.

pub mod api;
pub mod conversation;
pub mod driver;

pub use api::JournalApi;
pub use conversation::{
    Conversation, DisplayedMessage, LocalId, PendingSend, SendFailure, SendPhase,
};
pub use driver::ConversationDriver;
