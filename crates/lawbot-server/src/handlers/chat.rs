use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::chat::*;
use crate::services::conversation::ConversationManager;
use crate::utils::error::ApiError;

pub async fn chat_handler(
    State(manager): State<Arc<ConversationManager>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    info!(
        "Chat request: session={}, message_len={}",
        session_id,
        request.message.chars().count()
    );

    let outcome = manager.submit(session_id, &request.message).await;

    Ok(Json(ChatResponse {
        session_id,
        answer: outcome.reply.content,
        failed: outcome.failure.is_some(),
        turns: outcome.turns,
    }))
}

pub async fn conversation_handler(
    State(manager): State<Arc<ConversationManager>>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let turns = manager
        .find_conversation(session_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("session {}", session_id)))?;

    Ok(Json(ConversationResponse { session_id, turns }))
}

pub async fn reset_conversation_handler(
    State(manager): State<Arc<ConversationManager>>,
    Path(session_id): Path<SessionId>,
) -> StatusCode {
    manager.reset(session_id);
    StatusCode::NO_CONTENT
}
