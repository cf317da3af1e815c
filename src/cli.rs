//! Command-line interface for llmreview.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ReviewConfig;
use crate::export::{self, OutputFormat};
use crate::model::{ModelClient, OllamaClient, DEFAULT_ENDPOINT};
use crate::review::Reviewer;
use crate::scan;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NO_RESULTS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default config file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["llmreview.yaml", ".llmreview.yaml"];

/// Default directory for exported reports.
const DEFAULT_EXPORT_DIR: &str = "code_review_results";

/// Local LLM powered code review.
///
/// llmreview walks a file or directory tree, splits each file into
/// fixed-size chunks, asks a local model for improvement suggestions per
/// chunk, and prints the aggregated per-file results as a table, JSON,
/// or XML.
#[derive(Parser)]
#[command(name = "llmreview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review a file or directory with a local model
    Review(ReviewArgs),
    /// Create a starter config file
    Init(InitArgs),
}

/// Arguments for the review command.
#[derive(Parser)]
pub struct ReviewArgs {
    /// Path to review (file or directory)
    pub path: PathBuf,

    /// Model tag served by the local endpoint
    #[arg(short, long, default_value = "qwen2.5-coder:7b")]
    pub model: String,

    /// Base URL of the Ollama-compatible server
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Output format: text, json, or xml
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Also write the output to a timestamped file
    #[arg(long)]
    pub export: bool,

    /// Directory for exported files (implies --export)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "llmreview.yaml")]
    pub output: PathBuf,
}

/// Starter config written by `llmreview init`.
static CONFIG_TEMPLATE: &str = include_str!("templates/llmreview.yaml");

/// Discover a config file in the current directory.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load the run configuration: explicit path, discovered file, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<ReviewConfig> {
    match explicit {
        Some(path) => ReviewConfig::parse_file(path),
        None => match discover_config() {
            Some(path) => ReviewConfig::parse_file(&path),
            None => Ok(ReviewConfig::default()),
        },
    }
}

/// Run the review command.
pub fn run_review(args: &ReviewArgs) -> anyhow::Result<i32> {
    // Validate format
    let Some(format) = OutputFormat::parse(&args.format) else {
        eprintln!(
            "Error: invalid format {:?}, must be 'text', 'json', or 'xml'",
            args.format
        );
        return Ok(EXIT_ERROR);
    };

    // Load config
    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if config.chunk_size == 0 {
        eprintln!("Error: invalid config: chunk_size must be non-zero");
        return Ok(EXIT_ERROR);
    }

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let export_dir = if args.export || args.export_dir.is_some() {
        Some(
            args.export_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR)),
        )
    } else {
        None
    };

    // Collect files to review
    let metadata = std::fs::metadata(&abs_path)?;
    let files = if metadata.is_dir() {
        scan::collect_files(&abs_path, &config, export_dir.as_deref())?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to review");
        return Ok(EXIT_SUCCESS);
    }

    eprintln!(
        "Reviewing {} file{} with {} via {}",
        files.len().to_string().cyan(),
        if files.len() == 1 { "" } else { "s" },
        args.model.cyan(),
        args.endpoint.dimmed()
    );

    // Build the model client and fail fast if the server is down
    let timeout = Duration::from_secs(config.timeout_secs);
    let client = match OllamaClient::new(&args.endpoint, &args.model, timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Err(e) = client.ping() {
        eprintln!("Error: {}", e);
        eprintln!("Is the model server running at {}?", args.endpoint);
        return Ok(EXIT_ERROR);
    }

    // Run the pipeline
    let reviewer = Reviewer::new(&abs_path, config).show_progress(!args.no_progress);
    let result = reviewer.run(&files, &client);

    if result.failed > 0 {
        eprintln!(
            "{}",
            format!("{} of {} files failed", result.failed, result.scanned).yellow()
        );
    }

    if result.reviews.is_empty() {
        eprintln!("Error: no files produced results");
        return Ok(EXIT_NO_RESULTS);
    }

    // Output results
    let exported = export::write_output(&result.reviews, format, export_dir.as_deref())?;
    if let Some(path) = exported {
        eprintln!("Exported to {}", path.display().to_string().green());
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize prompts and excludes", args.output.display());
    println!("  2. Run: llmreview review . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
