//! Text embedding model abstraction
//!
//! The model itself runs elsewhere. This module only defines the seam the
//! pipeline calls through and an HTTP client for OpenAI-compatible
//! `/embeddings` endpoints.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// Encodes text into a fixed-length vector
///
/// Implementations must return vectors of the same dimensionality on every
/// call, and the same vector for the same text.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmbeddingModel: Send + Sync {
    async fn encode(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Length of every vector this model returns
    fn dimensions(&self) -> usize;
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

/// Embedding model served over HTTP
#[derive(Clone)]
pub struct HttpEmbeddingModel {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
}

impl HttpEmbeddingModel {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: String,
        dimensions: usize,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            dimensions,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.embedding_api_url.clone(),
            config.embedding_api_key.clone(),
            config.embedding_model.clone(),
            config.embedding_dimensions,
            Duration::from_millis(config.embedding_timeout_ms),
        )
    }

    /// Pulls the single vector out of a response body and checks its length
    fn parse_response(&self, response: EmbeddingResponse) -> AppResult<Vec<f32>> {
        let vector = response
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| AppError::Embedding("response contained no embeddings".to_string()))?;

        if vector.len() != self.dimensions {
            return Err(AppError::Embedding(format!(
                "model returned {} dimensions, expected {}",
                vector.len(),
                self.dimensions
            )));
        }

        Ok(vector)
    }
}

#[async_trait::async_trait]
impl EmbeddingModel for HttpEmbeddingModel {
    async fn encode(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}/embeddings", self.api_url);
        let body = json!({
            "model": self.model,
            "input": [text],
        });

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Embedding API returned an error");
            return Err(AppError::Embedding(format!(
                "embedding API returned {}: {}",
                status, message
            )));
        }

        let parsed: EmbeddingResponse = response.json().await?;
        self.parse_response(parsed)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
