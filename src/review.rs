//! Review pipeline: file -> chunks -> prompts -> suggestions.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chunk::split_chunks;
use crate::config::ReviewConfig;
use crate::model::{GenerationOptions, ModelClient};
use crate::scan::relative_path;

/// Leading courtesy boilerplate the model prepends before the actual list.
static LEADING_COURTESY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(sure|certainly|of course)\b[,!.:]*\s*").unwrap());

/// Trailing exclamation noise.
static TRAILING_BANG: Lazy<Regex> = Lazy::new(|| Regex::new(r"!+\s*$").unwrap());

/// Aggregated suggestions for one reviewed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReview {
    pub file_path: String,
    pub suggestions: String,
}

/// Results of a review run.
#[derive(Debug, Clone, Default)]
pub struct ReviewResult {
    pub reviews: Vec<FileReview>,
    /// Number of files attempted.
    pub scanned: usize,
    /// Number of files that failed and produced no row.
    pub failed: usize,
}

/// Executes the sequential review loop against a set of files.
pub struct Reviewer {
    base_dir: PathBuf,
    config: ReviewConfig,
    show_progress: bool,
}

impl Reviewer {
    /// Create a new reviewer rooted at `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P, config: ReviewConfig) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            config,
            show_progress: true,
        }
    }

    /// Set whether to draw progress bars.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Review every file in order, one model call per chunk.
    ///
    /// A file that cannot be read or whose model calls fail is reported and
    /// skipped; the run continues with the next file.
    pub fn run(&self, files: &[PathBuf], model: &dyn ModelClient) -> ReviewResult {
        let options = GenerationOptions {
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let progress = MultiProgress::new();
        let files_bar = self.add_bar(&progress, files.len() as u64, "Files");

        let mut result = ReviewResult::default();

        for file_path in files {
            result.scanned += 1;
            let rel = relative_path(file_path, &self.base_dir);

            match self.review_file(file_path, model, &options, &progress) {
                Ok(suggestions) => {
                    result.reviews.push(FileReview {
                        file_path: rel,
                        suggestions,
                    });
                }
                Err(e) => {
                    result.failed += 1;
                    let msg = format!("skipping {}: {:#}", rel, e);
                    if self.show_progress {
                        files_bar.println(msg);
                    } else {
                        eprintln!("{}", msg);
                    }
                }
            }
            files_bar.inc(1);
        }

        files_bar.finish_and_clear();
        result
    }

    /// Review a single file: chunk it, prompt the model per chunk, join the
    /// cleaned responses into a numbered suggestion list.
    fn review_file(
        &self,
        file_path: &Path,
        model: &dyn ModelClient,
        options: &GenerationOptions,
        progress: &MultiProgress,
    ) -> anyhow::Result<String> {
        // Lossy read: reviews should survive stray invalid bytes
        let bytes = std::fs::read(file_path)?;
        let content = String::from_utf8_lossy(&bytes);

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string_lossy().to_string());

        let chunks = split_chunks(&content, self.config.chunk_size);
        let chunks_bar = self.add_bar(progress, chunks.len() as u64, "Chunks");

        let mut suggestions = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let prompt = self.config.render_prompt(&file_name, index + 1, chunk);
            let response = model
                .generate(&self.config.system_prompt, &prompt, options)
                .map_err(|e| anyhow::anyhow!("chunk {}: {}", index + 1, e))?;
            suggestions.push(clean_response(&response));
            chunks_bar.inc(1);
        }

        chunks_bar.finish_and_clear();
        Ok(number_suggestions(&suggestions))
    }

    fn add_bar(&self, progress: &MultiProgress, total: u64, message: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = progress.add(ProgressBar::new(total));
        let style = ProgressStyle::default_bar()
            .template("{msg:>6} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        bar.set_message(message);
        bar
    }
}

/// Strip courtesy boilerplate from a model response.
pub fn clean_response(response: &str) -> String {
    let trimmed = response.trim_start();
    let stripped = LEADING_COURTESY.replace(trimmed, "");
    TRAILING_BANG.replace(stripped.trim_end(), "").to_string()
}

/// Join per-chunk suggestions as a numbered list.
pub fn number_suggestions(suggestions: &[String]) -> String {
    let mut combined = String::new();
    for (i, suggestion) in suggestions.iter().enumerate() {
        combined.push_str(&format!("{}. {}\n", i + 1, suggestion));
    }
    combined
}
