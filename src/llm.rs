//! OpenAI chat-completions client.
//!
//! One `POST /v1/chat/completions` per request with a system and a user
//! message. No retry; the caller decides whether a failure aborts the run
//! (evals) or is shown and swallowed (interactive session).

use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::config::OpenAiConfig;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Sampling temperature for study answers. Low enough to stay grounded in
/// the retrieved context, high enough to vary quiz phrasing.
const TEMPERATURE: f64 = 0.4;

/// A completed chat call: the assistant text plus token usage when the
/// API reports it.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub content: String,
    pub total_tokens: Option<u64>,
}

/// Client for the OpenAI chat-completions API.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` is not in the environment.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            anyhow::anyhow!("OPENAI_API_KEY environment variable not set. Export your key before running.")
        })?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key,
            model: config.chat_model.clone(),
        })
    }

    /// Returns the model identifier (e.g. `"gpt-4.1-mini"`).
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send one system + user message pair and return the reply.
    pub fn chat(&self, system: &str, user: &str) -> Result<ChatReply> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": TEMPERATURE,
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .context("Chat completions request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().unwrap_or_default();
            bail!("OpenAI chat API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json()?;
        parse_chat_response(&json)
    }
}

/// Extract `choices[0].message.content` (trimmed) and `usage.total_tokens`.
fn parse_chat_response(json: &serde_json::Value) -> Result<ChatReply> {
    let content = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            anyhow::anyhow!("Invalid chat response: missing choices[0].message.content")
        })?;

    let total_tokens = json
        .get("usage")
        .and_then(|u| u.get("total_tokens"))
        .and_then(|t| t.as_u64());

    Ok(ChatReply {
        content: content.trim().to_string(),
        total_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_response() {
        let json = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  Paris.  "}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        });
        let reply = parse_chat_response(&json).unwrap();
        assert_eq!(reply.content, "Paris.");
        assert_eq!(reply.total_tokens, Some(12));
    }

    #[test]
    fn test_parse_chat_response_no_usage() {
        let json = serde_json::json!({
            "choices": [{"message": {"content": "answer"}}]
        });
        let reply = parse_chat_response(&json).unwrap();
        assert_eq!(reply.content, "answer");
        assert_eq!(reply.total_tokens, None);
    }

    #[test]
    fn test_parse_chat_response_missing_choices() {
        let json = serde_json::json!({"error": {"message": "overloaded"}});
        assert!(parse_chat_response(&json).is_err());
    }
}
