//! Chat turn handler.
//!
//! Endpoint:
//! - POST /api/chat - `{userId, message}` -> `{response, sessionId}`

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use tutor_types::chat::{ChatReply, ChatRequest};
use tutor_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat - Run one chat turn.
///
/// The body is parsed by hand so that an empty or malformed body is a 400
/// with the usual `{error}` shape rather than axum's plain-text rejection.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, AppError> {
    let request = parse_chat_request(&body)?;
    let reply = state.chat_service.handle_chat(request).await?;
    Ok(Json(reply))
}

fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Chat(ChatError::InvalidRequest(format!("Invalid JSON body: {e}"))))
}
