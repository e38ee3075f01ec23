//! Session history handlers.
//!
//! Endpoints:
//! - GET  /api/session?userId=       - Interaction records, oldest first
//! - POST /api/session/clear?userId= - Clear history, `{success: true}`
//!
//! When `userId` is repeated, the first occurrence wins.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use tutor_types::error::ChatError;
use tutor_types::history::History;

use crate::http::error::AppError;
use crate::state::AppState;

const USER_ID_PARAM: &str = "userId";

/// Raw query pairs in request order.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// First `userId` value, or empty when absent. Missing and empty are both
/// rejected by the chat service.
fn user_id_param(query: QueryPairs) -> Result<String, AppError> {
    let Query(pairs) =
        query.map_err(|rejection| ChatError::InvalidRequest(rejection.body_text()))?;
    Ok(pairs
        .into_iter()
        .find(|(name, _)| name == USER_ID_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default())
}

/// GET /api/session - Current history for a user.
pub async fn get_history(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<History>, AppError> {
    let user_id = user_id_param(query)?;
    let history = state.chat_service.get_history_for_user(&user_id).await?;
    Ok(Json(history))
}

/// POST /api/session/clear - Replace a user's history with the empty sequence.
pub async fn clear_history(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = user_id_param(query)?;
    state.chat_service.clear_history_for_user(&user_id).await?;
    tracing::info!(user_id = %user_id, "history cleared");
    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;

    fn parse(uri: &str) -> QueryPairs {
        let uri: Uri = uri.parse().unwrap();
        Query::try_from_uri(&uri)
    }

    #[test]
    fn test_first_user_id_wins() {
        assert_eq!(user_id_param(parse("/api/session?userId=a&userId=b")).unwrap(), "a");
    }

    #[test]
    fn test_user_id_is_percent_decoded() {
        assert_eq!(
            user_id_param(parse("/api/session?other=1&userId=ada%20l")).unwrap(),
            "ada l"
        );
    }

    #[test]
    fn test_missing_user_id_is_empty() {
        assert_eq!(user_id_param(parse("/api/session")).unwrap(), "");
        assert_eq!(user_id_param(parse("/api/session?userId=")).unwrap(), "");
    }
}
