use std::time::{Duration, Instant};

use crate::models::chat::{ConversationTurn, SessionId};

pub const SUMMARY_LABEL: &str = "기존 대화 요약:";
pub const RETRIEVED_LABEL: &str = "검색된 컨텍스트:";

/// Conversation state of one user session.
///
/// Turns can only be appended; nothing hands out mutable access to them.
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Session identifier
    pub session_id: SessionId,

    turns: Vec<ConversationTurn>,

    /// Session creation time
    pub created_at: Instant,

    /// Last activity timestamp (drives idle expiration)
    pub last_activity: Instant,

    pub metadata: ConversationMetadata,
}

impl ConversationState {
    pub fn new(session_id: SessionId) -> Self {
        let now = Instant::now();
        Self {
            session_id,
            turns: Vec::new(),
            created_at: now,
            last_activity: now,
            metadata: ConversationMetadata::default(),
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn push_turn(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_activity.elapsed() >= idle_timeout
    }
}

/// Per-session counters, logged on every submission.
#[derive(Debug, Clone, Default)]
pub struct ConversationMetadata {
    pub submissions: usize,
    pub failed_submissions: usize,
}

/// Summary and retrieved text that go into the answer prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    pub summary: String,
    pub retrieved_text: String,
}

impl AssembledContext {
    pub fn build(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}",
            SUMMARY_LABEL, self.summary, RETRIEVED_LABEL, self.retrieved_text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_new_state_is_empty() {
        let state = ConversationState::new(Uuid::new_v4());
        assert!(state.is_empty());
        assert_eq!(state.metadata.submissions, 0);
    }

    #[test]
    fn test_turns_keep_insertion_order() {
        let mut state = ConversationState::new(Uuid::new_v4());
        state.push_turn(ConversationTurn::user("first"));
        state.push_turn(ConversationTurn::assistant("second"));

        let contents: Vec<&str> = state.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_idle_with_zero_timeout() {
        let state = ConversationState::new(Uuid::new_v4());
        assert!(state.is_idle(Duration::ZERO));
        assert!(!state.is_idle(Duration::from_secs(3600)));
    }

    #[test]
    fn test_context_layout() {
        let context = AssembledContext {
            summary: String::new(),
            retrieved_text: "doc".to_string(),
        };
        assert_eq!(context.build(), "기존 대화 요약:\n\n\n검색된 컨텍스트:\ndoc");
    }
}
