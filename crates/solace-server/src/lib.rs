// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP boundary for the Solace journal companion.
//!
//! Exposes the exchange pipeline and entry/message reads as a small JSON
//! API. Every handler delegates to the [`JournalStore`] seam or the
//! [`ExchangeCoordinator`]; this crate holds no business logic of its own.
//!
//! [`JournalStore`]: solace_core::JournalStore
//! [`ExchangeCoordinator`]: solace_exchange::ExchangeCoordinator

pub mod handlers;
pub mod server;
pub mod shutdown;

pub use handlers::{CreateEntryRequest, ErrorBody, HealthResponse, SendMessageRequest};
pub use server::{router, serve_on, start_server, AppState};
pub use shutdown::install_signal_handler;
