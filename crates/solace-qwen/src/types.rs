// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Qwen chat-completions API request/response types.
//!
//! The service speaks the widely-copied OpenAI chat-completions dialect:
//! a flat `{model, messages}` request and a `choices` array response.

use serde::{Deserialize, Serialize};
use solace_core::types::{Role, TranscriptTurn};

// --- Request types ---

/// A request to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "qwen3-32b").
    pub model: String,

    /// Ordered conversation turns, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// A single turn in the chat-completions wire format.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role: serialized as "user" or "assistant".
    pub role: Role,

    /// Text content of the turn.
    pub content: String,
}

impl From<&TranscriptTurn> for ChatMessage {
    fn from(turn: &TranscriptTurn) -> Self {
        Self {
            role: turn.role,
            content: turn.content.clone(),
        }
    }
}

// --- Response types ---

/// A response from the chat-completions endpoint.
///
/// Only the fields the pipeline consumes are modeled; the service sends
/// more (`id`, `usage`, ...) and serde ignores them.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions; the first choice carries the reply.
    pub choices: Vec<Choice>,
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
}

/// The message within a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Generated text. `None` when the service omits the field — a
    /// malformed response as far as the pipeline is concerned.
    pub content: Option<String>,
}

/// API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable error message.
    pub message: String,

    /// Error type identifier, when the service provides one.
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_chat_request() {
        let req = ChatRequest {
            model: "qwen3-32b".into(),
            messages: vec![
                ChatMessage {
                    role: Role::User,
                    content: "Hello".into(),
                },
                ChatMessage {
                    role: Role::Assistant,
                    content: "Hi! How are you?".into(),
                },
            ],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "qwen3-32b");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        assert_eq!(json["messages"][1]["role"], "assistant");
    }

    #[test]
    fn chat_message_from_transcript_turn() {
        let turn = TranscriptTurn::new(Role::Assistant, "ok");
        let msg = ChatMessage::from(&turn);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "ok");
    }

    #[test]
    fn deserialize_chat_response() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hello!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.choices.len(), 1);
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("Hello!"));
    }

    #[test]
    fn deserialize_chat_response_with_missing_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(resp.choices[0].message.content.is_none());
    }

    #[test]
    fn deserialize_chat_response_with_empty_choices() {
        let json = r#"{"choices": []}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(resp.choices.is_empty());
    }

    #[test]
    fn deserialize_api_error_body() {
        let json = r#"{"error": {"message": "Invalid model", "type": "invalid_request_error"}}"#;
        let err: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.message, "Invalid model");
        assert_eq!(err.error.type_.as_deref(), Some("invalid_request_error"));
    }

    #[test]
    fn deserialize_api_error_body_without_type() {
        let json = r#"{"error": {"message": "upstream exploded"}}"#;
        let err: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert!(err.error.type_.is_none());
    }
}
