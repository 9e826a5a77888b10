use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, static_dir: &str) -> Router {
    // Browser page
    let page_routes = Router::new()
        .route("/", get(handlers::page::index_handler))
        .route("/chat", post(handlers::page::submit_handler))
        .route("/reset", post(handlers::page::reset_handler));

    let api_routes = Router::new()
        .route("/api/chat", post(handlers::chat::chat_handler))
        .route(
            "/api/conversation/{session_id}",
            get(handlers::chat::conversation_handler)
                .delete(handlers::chat::reset_conversation_handler),
        );

    let health_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .merge(health_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
