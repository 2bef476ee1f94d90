//! Conversation orchestrator - bounded history and turn processing.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::llm::{ChatTransport, Sampling};
use crate::Result;

use super::message::Message;
use super::Reply;

/// Conversation orchestrator that keeps a bounded history.
///
/// The history always starts with the persona message, which is never
/// evicted. User and assistant messages are bounded to `history_limit`
/// turns (pairs), oldest evicted first. Taking `&mut self` per turn keeps
/// at most one request in flight per conversation.
pub struct Conversation<T: ChatTransport> {
    config: Config,
    transport: T,
    history: Vec<Message>,
    seq: u64,
}

impl<T: ChatTransport> Conversation<T> {
    /// Create a conversation seeded with the persona message.
    pub fn new(config: Config, transport: T) -> Result<Self> {
        let persona = config.persona_text.trim().to_string();
        if persona.is_empty() {
            return Err(Error::Config("Persona text is empty".to_string()));
        }

        let mut history = Vec::with_capacity(config.history_limit * 2 + 1);
        history.push(Message::system(persona, 0));

        Ok(Self {
            config,
            transport,
            history,
            seq: 1,
        })
    }

    /// Submit one user turn and return the assistant's reply.
    ///
    /// On transport failure the user message is kept in history, so the
    /// turn can be retried without re-typing.
    pub async fn submit_turn(&mut self, user_text: &str) -> Result<Reply> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("message is empty".to_string()));
        }

        let seq = self.take_seq();
        self.push_bounded(Message::user(text, seq));

        info!(seq, chars = text.len(), "submitting turn");

        let sampling = Sampling {
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            top_k: self.config.top_k,
        };
        let outcome = self
            .transport
            .send(&self.config.model, &sampling, &self.history)
            .await?;

        debug!(
            tokens = outcome.usage.total_tokens,
            "received reply ({} chars)",
            outcome.text.len()
        );

        let seq = self.take_seq();
        self.push_bounded(Message::assistant(outcome.text.clone(), seq));

        Ok(Reply {
            text: outcome.text,
            usage: outcome.usage,
        })
    }

    /// Full history including the persona message at index 0.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    /// Append a message, evicting the oldest user/assistant messages once
    /// the window exceeds `history_limit` pairs. The persona message at
    /// index 0 stays put.
    fn push_bounded(&mut self, message: Message) {
        self.history.push(message);
        let max = self.config.history_limit * 2;
        while self.history.len() - 1 > max {
            let evicted = self.history.remove(1);
            debug!(seq = evicted.seq, "evicted oldest message from window");
        }
    }
}
