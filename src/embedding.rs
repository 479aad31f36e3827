//! OpenAI embeddings client and vector similarity.
//!
//! [`EmbeddingClient`] wraps the `POST /v1/embeddings` endpoint: one
//! network call per text, no caching and no retry. A transport or API
//! failure propagates to the caller, which treats it as fatal for the
//! operation at hand (ingestion aborts, a query fails). The whole
//! pipeline is synchronous, so the blocking HTTP client is used directly.
//!
//! Also provides [`cosine_similarity`] for scoring a query vector against
//! the stored chunk vectors.

use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::config::OpenAiConfig;

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// Client for the OpenAI embeddings API.
///
/// Stateless beyond the model name: the same (model, text) input always
/// maps to one request. Requires the `OPENAI_API_KEY` environment
/// variable to be set at construction time.
pub struct EmbeddingClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl EmbeddingClient {
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
            model: config.embedding_model.clone(),
        })
    }

    /// Returns the model identifier (e.g. `"text-embedding-3-small"`).
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Embed a single text into a fixed-dimension vector.
    ///
    /// One request per invocation; failures propagate unretried.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
        });

        let response = self
            .http
            .post(EMBEDDINGS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .context("Embeddings request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().unwrap_or_default();
            bail!("OpenAI embeddings API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json()?;
        parse_embedding_response(&json)
    }
}

/// Extract `data[0].embedding` from an embeddings API response.
fn parse_embedding_response(json: &serde_json::Value) -> Result<Vec<f32>> {
    let embedding = json
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|d| d.first())
        .and_then(|item| item.get("embedding"))
        .and_then(|e| e.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid embeddings response: missing data[0].embedding"))?;

    Ok(embedding
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect())
}

/// Compute cosine similarity between two embedding vectors.
///
/// ```text
///               a · b
/// cos(θ) = ───────────────
///          ‖a‖ × ‖b‖ + 1e-9
/// ```
///
/// The 1e-9 term keeps the function defined for all-zero vectors: they
/// score near zero instead of dividing by zero. Commutative, and 1.0 for
/// identical non-zero vectors within floating-point tolerance.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt() + 1e-9)
}
