//! Output formatting for review results.
//!
//! Supports three output formats:
//! - Text: two-column table for human readability
//! - JSON: structured output for programmatic consumption
//! - XML: flat <results> document
//!
//! Every format goes to stdout; with an export directory set it is also
//! written to a timestamped file in that directory.

use chrono::Local;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::review::FileReview;

/// Column caps for the text table.
const PATH_COL_WIDTH: usize = 50;
const SUGGESTION_COL_WIDTH: usize = 100;

/// Output serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Xml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    /// File extension for exported output.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "xml" => Some(OutputFormat::Xml),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render results in the requested format.
pub fn render(reviews: &[FileReview], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reviews)),
        OutputFormat::Json => render_json(reviews),
        OutputFormat::Xml => render_xml(reviews),
    }
}

/// Print results to stdout and, if `export_dir` is set, write them to
/// `<export_dir>/review-<timestamp>.<ext>`. Returns the exported path.
pub fn write_output(
    reviews: &[FileReview],
    format: OutputFormat,
    export_dir: Option<&Path>,
) -> anyhow::Result<Option<PathBuf>> {
    let rendered = render(reviews, format)?;
    println!("{}", rendered);

    let Some(dir) = export_dir else {
        return Ok(None);
    };

    std::fs::create_dir_all(dir)?;
    let filename = format!(
        "review-{}.{}",
        Local::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    );
    let path = dir.join(filename);
    std::fs::write(&path, rendered)?;
    Ok(Some(path))
}

// =============================================================================
// Text format
// =============================================================================

/// Render results as a bordered two-column table.
fn render_text(reviews: &[FileReview]) -> String {
    let mut rows: Vec<(Vec<String>, Vec<String>)> = Vec::with_capacity(reviews.len());
    let mut path_width = "File path".len();
    let mut suggestion_width = "Suggestions".len();

    for review in reviews {
        let paths = wrap_cell(&review.file_path, PATH_COL_WIDTH);
        let suggestions = wrap_cell(&review.suggestions, SUGGESTION_COL_WIDTH);
        for line in &paths {
            path_width = path_width.max(line.chars().count());
        }
        for line in &suggestions {
            suggestion_width = suggestion_width.max(line.chars().count());
        }
        rows.push((paths, suggestions));
    }

    let divider = format!(
        "+-{}-+-{}-+",
        "-".repeat(path_width),
        "-".repeat(suggestion_width)
    );

    let mut out = String::new();
    out.push_str(&divider);
    out.push('\n');
    out.push_str(&format!(
        "| {:<pw$} | {:<sw$} |\n",
        "File path",
        "Suggestions",
        pw = path_width,
        sw = suggestion_width
    ));
    out.push_str(&divider);
    out.push('\n');

    for (paths, suggestions) in &rows {
        let height = paths.len().max(suggestions.len());
        for i in 0..height {
            let path = paths.get(i).map(String::as_str).unwrap_or("");
            let suggestion = suggestions.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&format!(
                "| {:<pw$} | {:<sw$} |\n",
                path,
                suggestion,
                pw = path_width,
                sw = suggestion_width
            ));
        }
        out.push_str(&divider);
        out.push('\n');
    }

    out
}

/// Wrap a cell's content to a maximum width, preserving explicit newlines.
fn wrap_cell(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in content.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for piece in chars.chunks(width) {
            lines.push(piece.iter().collect());
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// =============================================================================
// JSON format
// =============================================================================

fn render_json(reviews: &[FileReview]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(reviews)?)
}

// =============================================================================
// XML format
// =============================================================================

fn render_xml(reviews: &[FileReview]) -> anyhow::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Start(BytesStart::new("results")))?;
    for review in reviews {
        writer.write_event(Event::Start(BytesStart::new("result")))?;

        writer.write_event(Event::Start(BytesStart::new("file_path")))?;
        writer.write_event(Event::Text(BytesText::new(&review.file_path)))?;
        writer.write_event(Event::End(BytesEnd::new("file_path")))?;

        writer.write_event(Event::Start(BytesStart::new("suggestions")))?;
        writer.write_event(Event::Text(BytesText::new(&review.suggestions)))?;
        writer.write_event(Event::End(BytesEnd::new("suggestions")))?;

        writer.write_event(Event::End(BytesEnd::new("result")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("results")))?;

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}
