//! Message types for the conversation history

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry in the conversation history.
///
/// Messages are immutable once created. `seq` is assigned by the
/// conversation, strictly increasing within a session and never reused,
/// so surviving messages keep their relative order across eviction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub seq: u64,
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>, seq: u64) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
            seq,
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>, seq: u64) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            seq,
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>, seq: u64) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello", 3);
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "Hello");
        assert_eq!(msg.seq, 3);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi", 1)).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }
}
