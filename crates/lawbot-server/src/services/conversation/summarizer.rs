use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use crate::models::chat::{ChatMessage, ConversationTurn};

use super::manager::LlmProvider;

/// Compresses the turns that came before the current question.
pub struct ConversationSummarizer {
    llm: Arc<dyn LlmProvider>,
    instruction: String,
}

impl ConversationSummarizer {
    pub fn new(llm: Arc<dyn LlmProvider>, instruction: String) -> Self {
        Self { llm, instruction }
    }

    /// Returns an empty summary without calling the model when there is no history.
    pub async fn summarize(&self, history: &[ConversationTurn]) -> Result<String> {
        if history.is_empty() {
            debug!("No prior turns, skipping summarization");
            return Ok(String::new());
        }

        let transcript = flatten_history(history);
        debug!(
            "Summarizing {} prior turns ({} chars)",
            history.len(),
            transcript.chars().count()
        );

        let messages = vec![
            ChatMessage::system(self.instruction.clone()),
            ChatMessage::user(transcript),
        ];

        self.llm
            .complete(&messages)
            .await
            .context("Conversation summarization failed")
    }
}

/// Contents of every turn, both roles, one per line.
pub fn flatten_history(history: &[ConversationTurn]) -> String {
    history
        .iter()
        .map(|turn| turn.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
