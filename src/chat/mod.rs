//! Conversation module — bounded history and turn processing.
//!
//! This module contains:
//! - Message types for the conversation history
//! - The conversation orchestrator that owns the history, applies the
//!   truncation policy, and drives the transport client

mod conversation;
mod message;

pub use conversation::Conversation;
pub use message::{Message, Role};

use crate::llm::Usage;

/// Assistant reply for one completed turn.
///
/// Carries the raw reply text; display segments are derived from it by
/// [`crate::render::format`] at render time, never stored.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub usage: Usage,
}
