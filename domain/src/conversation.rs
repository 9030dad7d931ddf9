//! Conversation state entity
//!
//! An ordered, append-only sequence of turns owned by exactly one research
//! run at a time. Concurrent runs never share a conversation without
//! external serialization, so no interior locking is needed here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered sequence of turns for one conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Role::User, text));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Role::Assistant, text));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The text of the most recent user turn, if any.
    pub fn last_user_query(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.text.as_str())
    }

    /// Turns preceding the most recent one. Summarization works on this
    /// slice so the query being analyzed is never summarized into its own
    /// context.
    pub fn prior_turns(&self) -> &[Turn] {
        match self.turns.len() {
            0 => &[],
            n => &self.turns[..n - 1],
        }
    }

    /// Whether the conversation is long enough to be worth summarizing.
    pub fn needs_summary(&self, min_turns: usize) -> bool {
        self.turns.len() >= min_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut conv = ConversationState::new();
        conv.push_user("first");
        conv.push_assistant("second");
        conv.push_user("third");

        let texts: Vec<_> = conv.turns().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_last_user_query_skips_assistant() {
        let mut conv = ConversationState::new();
        conv.push_user("question");
        conv.push_assistant("answer");
        assert_eq!(conv.last_user_query(), Some("question"));
    }

    #[test]
    fn test_prior_turns_excludes_latest() {
        let mut conv = ConversationState::new();
        assert!(conv.prior_turns().is_empty());

        conv.push_user("a");
        conv.push_assistant("b");
        conv.push_user("c");
        let prior: Vec<_> = conv.prior_turns().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(prior, vec!["a", "b"]);
    }

    #[test]
    fn test_needs_summary_threshold() {
        let mut conv = ConversationState::new();
        conv.push_user("a");
        conv.push_assistant("b");
        conv.push_user("c");
        assert!(!conv.needs_summary(4));
        conv.push_assistant("d");
        assert!(conv.needs_summary(4));
    }
}
