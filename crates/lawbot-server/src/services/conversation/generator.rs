use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use crate::models::chat::ChatMessage;

use super::manager::LlmProvider;

/// Asks the model for the persona-driven answer.
///
/// The reply is returned verbatim; the persona's four-part layout is
/// left entirely to the model.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
    persona: String,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, persona: String) -> Self {
        Self { llm, persona }
    }

    pub fn build_prompt(&self, query: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.persona.clone()),
            ChatMessage::user(format!("질문: {}\n컨텍스트: {}", query, context)),
        ]
    }

    pub async fn generate(&self, query: &str, context: &str) -> Result<String> {
        let messages = self.build_prompt(query, context);
        debug!("Generating answer with {} chars of context", context.chars().count());

        self.llm
            .complete(&messages)
            .await
            .context("Answer generation failed")
    }
}
