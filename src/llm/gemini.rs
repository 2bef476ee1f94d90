//! Gemini transport implementation (API key authentication).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::chat::{Message, Role};
use crate::error::{Error, TransportKind};
use crate::Result;

use super::types::{Candidate, GeminiResponse};
use super::{ChatTransport, Sampling, TransportReply, Usage};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client using API key authentication.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, model, self.api_key
        )
    }

    fn convert_messages(messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                    Role::System => "user", // Filtered above
                };
                json!({
                    "role": role,
                    "parts": [{"text": m.text}]
                })
            })
            .collect()
    }

    fn system_instruction(messages: &[Message]) -> Option<&str> {
        messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.text.as_str())
    }

    fn parse_response(response: GeminiResponse) -> Result<TransportReply> {
        let usage = response
            .usage_metadata
            .as_ref()
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count.unwrap_or(0),
                completion_tokens: u.candidates_token_count.unwrap_or(0),
                total_tokens: u.total_token_count.unwrap_or(0),
            })
            .unwrap_or_default();

        let Candidate {
            content,
            finish_reason,
        } = response.candidates.into_iter().next().ok_or_else(|| {
            Error::transport(TransportKind::MalformedResponse, "no candidates in response")
        })?;

        let content = content.ok_or_else(|| {
            Error::transport(TransportKind::MalformedResponse, "candidate has no content")
        })?;

        let mut text = String::new();
        for part in &content.parts {
            if let Some(fragment) = &part.text {
                text.push_str(fragment);
            }
        }

        let text = text.trim().to_string();
        if text.is_empty() {
            let reason = finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(Error::transport(
                TransportKind::MalformedResponse,
                format!("response has no text (finish_reason={reason})"),
            ));
        }

        Ok(TransportReply { text, usage })
    }
}

fn classify_status(status: StatusCode) -> TransportKind {
    match status.as_u16() {
        401 | 403 => TransportKind::Auth,
        429 => TransportKind::RateLimit,
        _ => TransportKind::Network,
    }
}

#[async_trait]
impl ChatTransport for GeminiClient {
    async fn send(
        &self,
        model: &str,
        sampling: &Sampling,
        messages: &[Message],
    ) -> Result<TransportReply> {
        let mut request = json!({
            "contents": Self::convert_messages(messages),
            "generationConfig": {
                "temperature": sampling.temperature,
                "topP": sampling.top_p,
                "topK": sampling.top_k,
            }
        });

        if let Some(system) = Self::system_instruction(messages) {
            request["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        debug!(model, messages = messages.len(), "calling Gemini API");

        let response = self
            .client
            .post(self.build_url(model))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(
                classify_status(status),
                format!("Gemini API returned {status}: {body}"),
            ));
        }

        let decoded: GeminiResponse = response.json().await.map_err(|e| {
            Error::transport(
                TransportKind::MalformedResponse,
                format!("undecodable response body: {e}"),
            )
        })?;
        Self::parse_response(decoded)
    }
}
