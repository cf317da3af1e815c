//! Ollama-compatible model client.
//!
//! Generates completions via: POST {base_url}/api/generate
//! and probes server health via: GET {base_url}/api/tags

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerationOptions, ModelClient, ModelError};

/// Request body for /api/generate.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

/// Generation knobs in Ollama's options vocabulary.
#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response body for a non-streaming /api/generate call.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Blocking client for a local Ollama-compatible server.
///
/// The HTTP layer is async; the client owns a runtime and bridges with
/// `block_on`, so callers see one blocking invocation per chunk.
pub struct OllamaClient {
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a client for `model` served at `base_url`.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("llmreview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            http,
            runtime,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
        })
    }

    /// The model tag this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn generate_async(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            system,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else if e.is_connect() {
                    ModelError::Unavailable(self.base_url.clone())
                } else {
                    ModelError::Network(e)
                }
            })?;

        match response.status().as_u16() {
            200 => {
                let parsed: GenerateResponse = response.json().await?;
                Ok(parsed.response)
            }
            404 => Err(ModelError::ModelNotFound {
                model: self.model.clone(),
            }),
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(ModelError::Api(format!("HTTP {}: {}", status, text)))
            }
        }
    }

    async fn ping_async(&self) -> Result<(), ModelError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ModelError::Unavailable(self.base_url.clone())
                } else {
                    ModelError::Network(e)
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ModelError::Unavailable(self.base_url.clone()))
        }
    }
}

impl ModelClient for OllamaClient {
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        self.runtime
            .block_on(self.generate_async(system, prompt, options))
    }

    fn ping(&self) -> Result<(), ModelError> {
        self.runtime.block_on(self.ping_async())
    }
}
