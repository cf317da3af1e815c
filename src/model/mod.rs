//! Model client module.
//!
//! The language model is an opaque collaborator: given a system prompt, a
//! user prompt and generation parameters, it returns a response string.
//! `ModelClient` is the seam; `OllamaClient` talks to a local
//! Ollama-compatible server.

mod ollama;

pub use ollama::OllamaClient;

use thiserror::Error;

/// Default base URL for a local Ollama server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Errors that can occur when talking to the model server.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("model server unavailable at {0}")]
    Unavailable(String),
    #[error("model {model:?} not found on server (pull it first?)")]
    ModelNotFound { model: String },
    #[error("model server returned an error: {0}")]
    Api(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Generation parameters passed with every request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    /// Sampling temperature. 0.0 keeps reviews deterministic.
    pub temperature: f32,
    /// Generation cap in tokens.
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 1000,
        }
    }
}

/// An inference backend that turns a prompt into a response string.
///
/// One blocking invocation per chunk; implementations own any async
/// machinery internally.
pub trait ModelClient {
    /// Generate a completion for `prompt` under `system`.
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ModelError>;

    /// Check that the backend is reachable before starting a run.
    fn ping(&self) -> Result<(), ModelError> {
        Ok(())
    }
}
