use anyhow::Result;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::models::chat::{ChatMessage, ConversationTurn, RetrievedDocument, SessionId};
use crate::services::retriever::Retriever;
use crate::utils::error::{PipelineError, PipelineStage};

use super::cache::SessionStore;
use super::context_builder::ContextBuilder;
use super::generator::AnswerGenerator;
use super::summarizer::ConversationSummarizer;

/// Prefix of the assistant turn written when a submission fails.
pub const ERROR_TURN_PREFIX: &str = "오류가 발생했습니다: ";

/// Trait for embedding service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Trait for the vector store
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Up to `k` stored documents nearest to `query`, closest first.
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>>;

    async fn ping(&self) -> Result<()>;
}

/// Trait for LLM service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Result of one submission, after both turns were appended.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub reply: ConversationTurn,
    pub turns: Vec<ConversationTurn>,
    pub failure: Option<PipelineStage>,
}

pub struct ConversationManager {
    sessions: SessionStore,
    retriever: Retriever,
    summarizer: ConversationSummarizer,
    context_builder: ContextBuilder,
    generator: AnswerGenerator,
}

impl ConversationManager {
    pub fn new(
        sessions: SessionStore,
        retriever: Retriever,
        summarizer: ConversationSummarizer,
        context_builder: ContextBuilder,
        generator: AnswerGenerator,
    ) -> Self {
        Self {
            sessions,
            retriever,
            summarizer,
            context_builder,
            generator,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Append the user's turn, answer it, append the answer (or the error).
    ///
    /// Submissions on the same session are serialized by the session lock.
    pub async fn submit(&self, session_id: SessionId, query: &str) -> SubmissionOutcome {
        let start = Instant::now();
        let conversation = self.sessions.get_or_create(session_id);
        let mut state = conversation.lock().await;
        state.touch();

        let prior_turns = state.len();
        state.push_turn(ConversationTurn::user(query));

        info!(
            "Submission: session={}, prior_turns={}, query_len={}",
            session_id,
            prior_turns,
            query.chars().count()
        );

        let result = self
            .run_pipeline(query, &state.turns()[..prior_turns])
            .await;

        let (reply, failure) = match result {
            Ok(answer) => (ConversationTurn::assistant(answer), None),
            Err(e) => {
                error!(
                    "Pipeline failed at {} stage for session {}: {}",
                    e.stage(),
                    session_id,
                    e
                );
                state.metadata.failed_submissions += 1;
                (
                    ConversationTurn::assistant(format!("{}{}", ERROR_TURN_PREFIX, e)),
                    Some(e.stage()),
                )
            }
        };

        state.push_turn(reply.clone());
        state.metadata.submissions += 1;
        state.touch();

        info!(
            "Submission finished in {}ms: session={}, turns={}, failed={}/{}",
            start.elapsed().as_millis(),
            session_id,
            state.len(),
            state.metadata.failed_submissions,
            state.metadata.submissions
        );

        SubmissionOutcome {
            reply,
            turns: state.turns().to_vec(),
            failure,
        }
    }

    /// Retrieve, summarize the prior history, assemble, generate.
    pub async fn run_pipeline(
        &self,
        query: &str,
        history: &[ConversationTurn],
    ) -> Result<String, PipelineError> {
        let documents = self
            .retriever
            .retrieve(query)
            .await
            .map_err(PipelineError::Retrieval)?;

        let summary = self
            .summarizer
            .summarize(history)
            .await
            .map_err(PipelineError::Summarization)?;

        let context = self.context_builder.assemble(&summary, &documents);
        debug!(
            "Assembled context: {} documents, summary {} chars, total {} chars",
            documents.len(),
            summary.chars().count(),
            context.chars().count()
        );

        self.generator
            .generate(query, &context)
            .await
            .map_err(PipelineError::Generation)
    }

    /// Current turns of a live session, empty when the session does not exist.
    pub async fn conversation(&self, session_id: SessionId) -> Vec<ConversationTurn> {
        self.find_conversation(session_id).await.unwrap_or_default()
    }

    pub async fn find_conversation(&self, session_id: SessionId) -> Option<Vec<ConversationTurn>> {
        let conversation = self.sessions.get(session_id)?;
        let state = conversation.lock().await;
        Some(state.turns().to_vec())
    }

    /// Drop the session; the next access starts an empty one.
    pub fn reset(&self, session_id: SessionId) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            info!("Session {} reset", session_id);
        }
        removed
    }
}
