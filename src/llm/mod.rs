//! LLM transport abstraction layer.
//!
//! This module provides:
//! - [`ChatTransport`] trait for swappable LLM providers
//! - The concrete Gemini REST implementation
//!
//! One outbound call is made per turn; the caller awaits the future to
//! completion, so there is never more than one request in flight per
//! conversation and no mid-call cancellation.

mod types;

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::Message;
use crate::Result;

/// Sampling parameters forwarded with every request.
#[derive(Debug, Clone, Copy)]
pub struct Sampling {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

/// Raw result of a transport call.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub text: String,
    pub usage: Usage,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Transport trait — swappable provider abstraction.
///
/// Failures map into `Error::Transport` with a kind the caller can use to
/// decide whether retrying makes sense; the transport itself never retries.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the ordered message payload and return the reply text.
    async fn send(
        &self,
        model: &str,
        sampling: &Sampling,
        messages: &[Message],
    ) -> Result<TransportReply>;
}

/// Fake transport for testing — queued replies, recorded payloads.
#[cfg(test)]
#[derive(Clone)]
pub struct FakeTransport {
    replies: std::sync::Arc<std::sync::Mutex<std::collections::VecDeque<Result<String>>>>,
    payloads: std::sync::Arc<std::sync::Mutex<Vec<Vec<Message>>>>,
}

#[cfg(test)]
impl FakeTransport {
    /// Create with predefined text replies.
    pub fn new(replies: Vec<&str>) -> Self {
        Self::from_results(replies.iter().map(|s| Ok(s.to_string())).collect())
    }

    /// Create with a mix of replies and injected failures.
    pub fn from_results(results: Vec<Result<String>>) -> Self {
        Self {
            replies: std::sync::Arc::new(std::sync::Mutex::new(results.into())),
            payloads: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Create with a single injected failure of the given kind.
    pub fn failing(kind: crate::error::TransportKind, message: &str) -> Self {
        Self::from_results(vec![Err(crate::error::Error::transport(kind, message))])
    }

    /// Payloads recorded from every `send` call, in order.
    pub fn payloads(&self) -> Vec<Vec<Message>> {
        self.payloads.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ChatTransport for FakeTransport {
    async fn send(
        &self,
        _model: &str,
        _sampling: &Sampling,
        messages: &[Message],
    ) -> Result<TransportReply> {
        self.payloads.lock().unwrap().push(messages.to_vec());

        let next = self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(crate::error::Error::transport(
                crate::error::TransportKind::Network,
                "no more fake replies",
            ))
        });
        next.map(|text| TransportReply {
            text,
            usage: Usage::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_transport_replies_in_order() {
        let transport = FakeTransport::new(vec!["Hello!", "World!"]);
        let sampling = Sampling {
            temperature: 0.8,
            top_p: 0.95,
            top_k: 40,
        };

        let messages = vec![Message::user("hi", 1)];
        let first = transport.send("m", &sampling, &messages).await.unwrap();
        assert_eq!(first.text, "Hello!");

        let second = transport.send("m", &sampling, &messages).await.unwrap();
        assert_eq!(second.text, "World!");

        assert_eq!(transport.payloads().len(), 2);
    }
}
