use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::debug;
use uuid::Uuid;

use crate::models::chat::QueryForm;
use crate::state::AppState;
use crate::utils::error::ApiError;

use super::session::{resolve_session, with_session_cookie};

/// Render the chat page with every turn of the caller's session.
pub async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let (session_id, is_new) = resolve_session(&headers, &state.session_cookie);

    let turns = state.conversation_manager.conversation(session_id).await;
    let html = state
        .renderer
        .render(&turns)
        .map_err(|e| ApiError::InternalError(format!("{:#}", e)))?;

    let response = Html(html).into_response();
    Ok(if is_new {
        with_session_cookie(response, &state.session_cookie, session_id)
    } else {
        response
    })
}

/// Run one submission, then send the browser back to the page.
pub async fn submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<QueryForm>,
) -> Response {
    let (session_id, is_new) = resolve_session(&headers, &state.session_cookie);

    if form.query.trim().is_empty() {
        debug!("Ignoring blank query for session {}", session_id);
    } else {
        state
            .conversation_manager
            .submit(session_id, &form.query)
            .await;
    }

    let response = Redirect::to("/").into_response();
    if is_new {
        with_session_cookie(response, &state.session_cookie, session_id)
    } else {
        response
    }
}

/// Start a new conversation under a new session id.
pub async fn reset_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, _) = resolve_session(&headers, &state.session_cookie);
    state.conversation_manager.reset(session_id);

    with_session_cookie(
        Redirect::to("/").into_response(),
        &state.session_cookie,
        Uuid::new_v4(),
    )
}
