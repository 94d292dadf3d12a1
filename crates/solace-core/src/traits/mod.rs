// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the pipeline and its two replaceable boundaries:
//! the message store and the completion service.
//!
//! Both traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod completion;
pub mod store;

pub use completion::CompletionBackend;
pub use store::JournalStore;
