//! Review configuration schema.
//!
//! A config file tunes the prompts and generation parameters for a run.
//! Everything has a built-in default, so the tool works without one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::chunk::DEFAULT_CHUNK_SIZE;

/// System prompt fixed for every chunk.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Imagine that you are a developer, and you are \
reviewing the code of a junior. You should give short suggestions for improving the code.";

/// Per-chunk user prompt. `{file}`, `{chunk}` and `{content}` are substituted.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "The file '{file}' (chunk '{chunk}') contains: \
{content}. Could you give some recommendations for improving the code? Sort the suggestion \
list by priority from high to low.";

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// System prompt sent with every chunk.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// User prompt template with {file}, {chunk} and {content} placeholders.
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
    /// Maximum characters per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Sampling temperature. 0.0 keeps reviews deterministic.
    #[serde(default)]
    pub temperature: f32,
    /// Generation cap in tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Glob patterns for paths to exclude from a directory scan
    /// (e.g., "**/node_modules/**", "**/*.lock").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            prompt_template: default_prompt_template(),
            chunk_size: default_chunk_size(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            excluded_paths: Vec::new(),
        }
    }
}

impl ReviewConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ReviewConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Render the per-chunk user prompt.
    pub fn render_prompt(&self, file_name: &str, chunk_number: usize, content: &str) -> String {
        self.prompt_template
            .replace("{file}", file_name)
            .replace("{chunk}", &chunk_number.to_string())
            .replace("{content}", content)
    }

    /// Check if a path matches any excluded_paths pattern.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ReviewConfig = serde_yaml::from_str("chunk_size: 500").unwrap();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config: ReviewConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.prompt_template, DEFAULT_PROMPT_TEMPLATE);
        assert!(config.excluded_paths.is_empty());
    }

    #[test]
    fn test_render_prompt_substitutes_placeholders() {
        let config = ReviewConfig::default();
        let prompt = config.render_prompt("main.rs", 2, "fn main() {}");
        assert!(prompt.contains("'main.rs'"));
        assert!(prompt.contains("(chunk '2')"));
        assert!(prompt.contains("fn main() {}"));
        assert!(!prompt.contains("{file}"));
    }

    #[test]
    fn test_excluded_paths_glob() {
        let config = ReviewConfig {
            excluded_paths: vec!["**/target/**".to_string(), "**/*.lock".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(Path::new("proj/target/debug/foo")));
        assert!(config.is_path_excluded(Path::new("proj/Cargo.lock")));
        assert!(!config.is_path_excluded(Path::new("proj/src/main.rs")));
    }
}
