// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Qwen chat-completions provider adapter for the Solace journal.
//!
//! This crate implements [`CompletionBackend`] over the Qwen HTTP API:
//! one authenticated POST per completion, no streaming, no internal retry.
//!
//! [`CompletionBackend`]: solace_core::CompletionBackend

pub mod client;
pub mod types;

pub use client::QwenClient;
