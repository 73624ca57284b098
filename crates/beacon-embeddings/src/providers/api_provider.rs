//! OpenAI-compatible embedding provider.
//!
//! Sends `POST {base_url}/embeddings` with `{"input": [...], "model": ...}` and
//! reads `data[].embedding`. Works against LM Studio, vLLM, llama.cpp server
//! and OpenAI itself.
//!
//! Uses reqwest's blocking client; call it from a blocking context
//! (`spawn_blocking` or a plain thread), never directly on an async worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use beacon_core::config::EmbeddingConfig;
use beacon_core::errors::{BeaconResult, EmbeddingError};
use beacon_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::vectors::{validate_count, validate_dimensions};

pub struct ApiProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    base_url: String,
    model: String,
    dimensions: usize,
    api_key: Option<String>,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

impl ApiProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> BeaconResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::RequestFailed {
                reason: format!("HTTP client init failed: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: format!("{base_url}/embeddings"),
            base_url,
            model: model.into(),
            dimensions,
            api_key: None,
            available: AtomicBool::new(true),
        })
    }

    pub fn from_config(config: &EmbeddingConfig) -> BeaconResult<Self> {
        let provider = Self::new(
            config.base_url.clone(),
            config.model.clone(),
            config.dimensions,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(provider.with_api_key(std::env::var("BEACON_EMBEDDING_API_KEY").ok()))
    }

    /// Bearer token for hosted endpoints. Local servers ignore it.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Probe `GET {base_url}/models` and record the result.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        let ok = match self.client.get(&url).send() {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(status = %resp.status(), "embedding server health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "embedding server unreachable");
                false
            }
        };
        self.available.store(ok, Ordering::Relaxed);
        ok
    }

    fn request_embeddings(&self, texts: &[String]) -> BeaconResult<Vec<Vec<f32>>> {
        let mut request = self.client.post(&self.endpoint).json(&EmbedRequest {
            input: texts,
            model: &self.model,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            self.available.store(false, Ordering::Relaxed);
            EmbeddingError::RequestFailed {
                reason: format!("HTTP error: {e}"),
            }
        })?;
        self.available.store(true, Ordering::Relaxed);

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::RequestFailed {
                reason: format!("server returned {status}: {body}"),
            }
            .into());
        }

        let mut parsed: EmbedResponse =
            response.json().map_err(|e| EmbeddingError::RequestFailed {
                reason: format!("JSON parse error: {e}"),
            })?;
        // OpenAI documents `index`; order by it when present.
        if parsed.data.iter().all(|d| d.index.is_some()) {
            parsed.data.sort_by_key(|d| d.index);
        }
        let vectors: Vec<Vec<f32>> = parsed.data.into_iter().map(|d| d.embedding).collect();

        validate_count(&vectors, texts.len())?;
        for v in &vectors {
            validate_dimensions(v, self.dimensions)?;
        }
        debug!(count = vectors.len(), model = %self.model, "embeddings received");
        Ok(vectors)
    }
}

impl IEmbeddingProvider for ApiProvider {
    fn embed_batch(&self, texts: &[String]) -> BeaconResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "api"
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
