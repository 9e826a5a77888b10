//! In-memory stand-ins for the vector store and the language model.

use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::models::chat::{ChatMessage, RetrievedDocument};
use crate::services::conversation::{
    AnswerGenerator, ContextBuilder, ConversationManager, ConversationSummarizer, LlmProvider,
    SessionStore, VectorStore,
};
use crate::services::prompts::{LABOR_LAW_PERSONA, SUMMARY_INSTRUCTION};
use crate::services::Retriever;

#[derive(Clone)]
pub struct FakeVectorStore {
    documents: Result<Vec<String>, String>,
    queries: Arc<Mutex<Vec<(String, usize)>>>,
}

impl FakeVectorStore {
    pub fn with_documents<S: AsRef<str>>(documents: Vec<S>) -> Self {
        Self {
            documents: Ok(documents.iter().map(|d| d.as_ref().to_string()).collect()),
            queries: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            documents: Err(message.to_string()),
            queries: Arc::default(),
        }
    }

    pub fn last_query(&self) -> Option<(String, usize)> {
        self.queries.lock().last().cloned()
    }
}

#[async_trait::async_trait]
impl VectorStore for FakeVectorStore {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        self.queries.lock().push((query.to_string(), k));
        match &self.documents {
            Ok(docs) => Ok(docs.iter().take(k).map(RetrievedDocument::new).collect()),
            Err(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }

    async fn ping(&self) -> Result<()> {
        match &self.documents {
            Ok(_) => Ok(()),
            Err(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}

/// Language model with a canned reply that records every prompt.
#[derive(Clone)]
pub struct ScriptedLlm {
    reply: Result<String, String>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Content of the user message of the most recent call.
    pub fn last_user_message(&self) -> Option<String> {
        self.calls
            .lock()
            .last()
            .and_then(|messages| messages.iter().find(|m| m.role == "user"))
            .map(|m| m.content.clone())
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().push(messages.to_vec());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}

pub fn manager_with(
    store: FakeVectorStore,
    summary_llm: ScriptedLlm,
    answer_llm: ScriptedLlm,
) -> ConversationManager {
    ConversationManager::new(
        SessionStore::new(Duration::from_secs(3600)),
        Retriever::new(Arc::new(store), 5),
        ConversationSummarizer::new(Arc::new(summary_llm), SUMMARY_INSTRUCTION.to_string()),
        ContextBuilder::default(),
        AnswerGenerator::new(Arc::new(answer_llm), LABOR_LAW_PERSONA.to_string()),
    )
}
