//! HTTP client for the embedding collaborator
//!
//! Calls an OpenAI-compatible embeddings endpoint: request
//! `{ "model": ..., "input": [...] }`, response
//! `{ "data": [{ "embedding": [...] }, ...] }`.
//!
//! The client performs exactly one attempt per call. A transport error or a
//! response that cannot be parsed fails the current search attempt with
//! `Error::Embedding`; the orchestration layer turns that into "no context
//! available". No retry, no backoff.
//!
//! Credentials are injected through `EmbedConfig` at construction time,
//! never read from literals.

use quarry_core::error::{Error, Result};
use quarry_core::traits::Embedder;
use std::time::Duration;

/// Configuration for the embedding client
///
/// # Example
///
/// ```
/// use quarry_embed::api::EmbedConfig;
/// use std::time::Duration;
///
/// let config = EmbedConfig::new("https://api.example.com/v1/embeddings",
///                               "text-embedding-3-small", 1536)
///     .with_api_key("sk-from-startup-config")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.dims, 1536);
/// ```
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Full URL of the embeddings endpoint
    pub endpoint: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Expected vector length; shorter or longer responses are rejected
    pub dims: usize,

    /// Bearer token, supplied at startup
    pub api_key: Option<String>,

    /// Request timeout
    pub timeout: Duration,
}

impl EmbedConfig {
    /// Create a config with a 30 second timeout and no API key
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, dims: usize) -> Self {
        EmbedConfig {
            endpoint: endpoint.into(),
            model: model.into(),
            dims,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Builder: set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder: set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Embedder backed by an OpenAI-compatible embeddings endpoint
pub struct ApiEmbedder {
    config: EmbedConfig,
}

impl ApiEmbedder {
    /// Create a client from injected configuration
    pub fn new(config: EmbedConfig) -> Self {
        ApiEmbedder { config }
    }

    fn call(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = serde_json::json!({
            "model": self.config.model,
            "input": inputs,
        });
        let body_bytes = serde_json::to_vec(&body)
            .map_err(|e| Error::Embedding(format!("failed to serialize request: {}", e)))?;

        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(self.config.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(agent_config);

        let mut request = agent
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", &format!("Bearer {}", key));
        }

        tracing::debug!(
            target: "quarry::embed",
            model = %self.config.model,
            inputs = inputs.len(),
            "Requesting embeddings"
        );

        let mut response = request
            .send(&body_bytes[..])
            .map_err(|e| Error::Embedding(e.to_string()))?;
        let response_text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Embedding(format!("failed to read response: {}", e)))?;

        parse_embeddings(&response_text, inputs.len(), self.config.dims)
    }
}

impl Embedder for ApiEmbedder {
    fn model(&self) -> &str {
        &self.config.model
    }

    fn dims(&self) -> usize {
        self.config.dims
    }

    fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        self.call(inputs)
    }
}

/// Parse the `data[*].embedding` arrays out of a response body
fn parse_embeddings(response_text: &str, expected_count: usize, dims: usize) -> Result<Vec<Vec<f32>>> {
    let json: serde_json::Value = serde_json::from_str(response_text)
        .map_err(|e| Error::Embedding(format!("invalid JSON response: {}", e)))?;

    let data = json.get("data").and_then(|d| d.as_array()).ok_or_else(|| {
        Error::Embedding(format!(
            "unexpected response format: {}",
            &response_text[..response_text.len().min(200)]
        ))
    })?;

    if data.len() != expected_count {
        return Err(Error::Embedding(format!(
            "expected {} vectors, got {}",
            expected_count,
            data.len()
        )));
    }

    let mut vectors = Vec::with_capacity(data.len());
    for item in data {
        let values = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| Error::Embedding("missing embedding in response item".to_string()))?;
        let mut vector = Vec::with_capacity(values.len());
        for value in values {
            let v = value
                .as_f64()
                .ok_or_else(|| Error::Embedding("non-numeric value in embedding".to_string()))?;
            vector.push(v as f32);
        }
        if vector.len() != dims {
            return Err(Error::DimensionMismatch {
                expected: dims,
                actual: vector.len(),
            });
        }
        vectors.push(vector);
    }
    Ok(vectors)
}
