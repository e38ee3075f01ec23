//! Request and reply shapes for a single chat turn.
//!
//! Field names follow the JSON wire format (`userId`, `sessionId`).

use serde::{Deserialize, Serialize};

/// Inbound chat turn. Both fields are optional at the wire level so that a
/// missing field is reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            message: Some(message.into()),
        }
    }
}

/// Outcome of a chat turn: the recorded reply and the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_missing_fields_deserialize() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(req.user_id.is_none());
        assert_eq!(req.message.as_deref(), Some("hi"));

        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_id.is_none() && req.message.is_none());
    }

    #[test]
    fn test_chat_request_camel_case() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"userId":"alice","message":"What is a stack?"}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn test_chat_reply_serialize() {
        let reply = ChatReply {
            response: "A stack is a LIFO structure.".to_string(),
            session_id: "alice".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["response"], "A stack is a LIFO structure.");
        assert_eq!(json["sessionId"], "alice");
    }
}
