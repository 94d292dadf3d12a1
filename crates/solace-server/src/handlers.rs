// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the journal REST API.
//!
//! Handles GET /health plus the /api/v1/journal routes for creating and
//! listing entries, reading message history, and running exchanges.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use solace_core::types::{EntryId, HealthStatus, OwnerId};
use solace_core::SolaceError;

use crate::server::AppState;

/// Request body for POST /api/v1/journal/entries.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Owner of the new entry.
    pub owner_id: String,
    /// Optional entry title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Query parameters for GET /api/v1/journal/entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Owner whose entries to list.
    pub owner_id: String,
}

/// Request body for POST /api/v1/journal/entries/{id}/messages.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Owner of the entry being written to.
    pub owner_id: String,
    /// User message content; must be non-empty after trimming.
    pub content: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string: "ok", "degraded", or "unhealthy".
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error description.
    pub error: String,
    /// Stable machine-readable error kind.
    pub kind: String,
    /// Whether re-issuing the same request could plausibly succeed.
    pub retriable: bool,
}

/// GET /health
///
/// Probes the message store and reports service health.
pub async fn get_health(State(state): State<AppState>) -> Response {
    match state.store.health_check().await {
        Ok(HealthStatus::Healthy) => health_response(StatusCode::OK, "ok"),
        Ok(HealthStatus::Degraded(detail)) => {
            warn!(detail = %detail, "storage degraded");
            health_response(StatusCode::OK, "degraded")
        }
        Ok(HealthStatus::Unhealthy(detail)) => {
            error!(detail = %detail, "storage unhealthy");
            health_response(StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
        Err(e) => {
            error!(error = %e, "health check failed");
            health_response(StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    }
}

fn health_response(code: StatusCode, status: &str) -> Response {
    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
        .into_response()
}

/// POST /api/v1/journal/entries
///
/// Creates a new journal entry and returns it with server-assigned id
/// and creation timestamp.
pub async fn post_entries(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Response {
    if body.owner_id.trim().is_empty() {
        return error_response(SolaceError::InvalidInput(
            "owner_id must not be empty".into(),
        ));
    }

    let owner = OwnerId(body.owner_id);
    match state.store.create_entry(&owner, body.title.as_deref()).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/journal/entries?owner_id=
///
/// Lists the owner's entries, newest first.
pub async fn get_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Response {
    let owner = OwnerId(query.owner_id);
    match state.store.list_entries(&owner).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/journal/entries/{id}/messages
///
/// Returns the entry's full message history in conversation order. This is
/// the authoritative read clients reconcile against after a detached send.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> Response {
    let entry_id = EntryId(entry_id);
    match state.store.get_entry(entry_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(SolaceError::EntryNotFound { id: entry_id }),
        Err(e) => return error_response(e),
    }

    match state.store.list_messages(entry_id).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/v1/journal/entries/{id}/messages
///
/// Runs one full exchange: persists the user message, calls the completion
/// service with the entry's transcript, persists and returns the assistant
/// reply. The pipeline runs on a detached task so a client disconnect cannot
/// cancel a half-finished exchange; the user message (and the reply, if
/// generation succeeds) is committed regardless.
pub async fn post_exchange(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
    Json(body): Json<SendMessageRequest>,
) -> Response {
    let coordinator = state.coordinator.clone();
    let owner = OwnerId(body.owner_id);
    let content = body.content;

    let task = tokio::spawn(async move {
        coordinator
            .exchange(EntryId(entry_id), &owner, &content)
            .await
    });

    match task.await {
        Ok(Ok(message)) => (StatusCode::CREATED, Json(message)).into_response(),
        Ok(Err(e)) => error_response(e),
        Err(e) => error_response(SolaceError::Internal(format!(
            "exchange task failed: {e}"
        ))),
    }
}

/// Maps a pipeline error to its HTTP status and typed error body.
fn error_response(error: SolaceError) -> Response {
    let (status, kind) = match &error {
        SolaceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input".to_string()),
        SolaceError::EntryNotFound { .. } => {
            (StatusCode::NOT_FOUND, "entry_not_found".to_string())
        }
        SolaceError::GenerationFailed { reason, .. } => {
            (StatusCode::BAD_GATEWAY, reason.to_string())
        }
        SolaceError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error".to_string(),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal".to_string()),
    };

    if status.is_server_error() {
        error!(status = %status, error = %error, "request failed");
    }

    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            kind,
            retriable: error.is_retriable(),
        }),
    )
        .into_response()
}
