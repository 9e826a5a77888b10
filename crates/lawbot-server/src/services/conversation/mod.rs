//! Conversation pipeline
//!
//! Per-session turn history plus the stages that answer a question:
//! - Session store (DashMap, one async lock per session)
//! - History summarization
//! - Context assembly from summary and retrieved documents
//! - Persona-driven answer generation

mod cache;
mod context_builder;
mod generator;
pub mod manager;
mod summarizer;
pub mod types;

pub use cache::{SessionStore, SharedConversation};
pub use context_builder::{ContextBuilder, DEFAULT_MAX_DOCUMENT_CHARS, NO_CONTEXT_FOUND};
pub use generator::AnswerGenerator;
pub use manager::{
    ConversationManager, EmbeddingProvider, LlmProvider, SubmissionOutcome, VectorStore,
    ERROR_TURN_PREFIX,
};
pub use summarizer::{flatten_history, ConversationSummarizer};
pub use types::{AssembledContext, ConversationState};

pub use crate::models::chat::{ChatMessage, ConversationTurn, SessionId};
