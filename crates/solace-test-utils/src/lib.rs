// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Solace integration tests.
//!
//! Provides a mock completion backend and storage harness for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockCompletion`] - Mock completion backend with queued outcomes
//! - [`TestJournal`] - Initialized SQLite store in a temp directory

pub mod harness;
pub mod mock_completion;

pub use harness::TestJournal;
pub use mock_completion::MockCompletion;
