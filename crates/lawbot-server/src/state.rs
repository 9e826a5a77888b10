use axum::extract::FromRef;
use std::sync::Arc;

use crate::services::conversation::{ConversationManager, VectorStore};
use crate::ui::PageRenderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub conversation_manager: Arc<ConversationManager>,
    pub vector_store: Arc<dyn VectorStore>,
    pub renderer: Arc<PageRenderer>,
    pub session_cookie: String,
}

impl FromRef<AppState> for Arc<ConversationManager> {
    fn from_ref(state: &AppState) -> Self {
        state.conversation_manager.clone()
    }
}
