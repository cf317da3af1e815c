//! llmreview - local LLM powered code review.
//!
//! llmreview walks a file or directory tree, splits each file into
//! fixed-size chunks, asks a local Ollama-compatible model for improvement
//! suggestions per chunk, and exports the aggregated per-file results as a
//! table, JSON, or XML. The loop is deliberately sequential: one blocking
//! model call per chunk, no retries, no caching.
//!
//! # Architecture
//!
//! - `chunk`: fixed-stride character chunking
//! - `scan`: file gathering and path rendering
//! - `config`: YAML run configuration (prompts, generation parameters)
//! - `model`: the model-client seam and the Ollama implementation
//! - `review`: the file-to-chunk-to-prompt-to-suggestion pipeline
//! - `export`: output formatting (text table, JSON, XML)

pub mod chunk;
pub mod cli;
pub mod config;
pub mod export;
pub mod model;
pub mod review;
pub mod scan;

pub use chunk::split_chunks;
pub use config::ReviewConfig;
pub use export::OutputFormat;
pub use model::{GenerationOptions, ModelClient, ModelError, OllamaClient};
pub use review::{FileReview, ReviewResult, Reviewer};
