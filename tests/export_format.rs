//! Tests for the exported output formats.
//!
//! These verify the serialized shapes a consumer would parse: the JSON row
//! objects, the flat XML document, and the bordered text table.

use llmreview::export::{self, OutputFormat};
use llmreview::review::FileReview;

fn sample_reviews() -> Vec<FileReview> {
    vec![
        FileReview {
            file_path: "src/main.rs".to_string(),
            suggestions: "1. handle errors explicitly\n2. add a --help example\n".to_string(),
        },
        FileReview {
            file_path: "src/util/strings.rs".to_string(),
            suggestions: "1. prefer &str parameters\n".to_string(),
        },
    ]
}

#[test]
fn test_json_output_is_array_of_row_objects() {
    let json = export::render(&sample_reviews(), OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let rows = parsed.as_array().expect("top level should be an array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["file_path"], "src/main.rs");
    assert!(rows[0]["suggestions"]
        .as_str()
        .unwrap()
        .starts_with("1. handle errors"));
}

#[test]
fn test_json_output_round_trips() {
    let json = export::render(&sample_reviews(), OutputFormat::Json).unwrap();
    let parsed: Vec<FileReview> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1].file_path, "src/util/strings.rs");
}

#[test]
fn test_xml_output_structure() {
    let xml = export::render(&sample_reviews(), OutputFormat::Xml).unwrap();

    assert!(xml.starts_with("<results>"));
    assert!(xml.ends_with("</results>"));
    assert_eq!(xml.matches("<result>").count(), 2);
    assert_eq!(xml.matches("</result>").count(), 2);
    assert!(xml.contains("<file_path>src/main.rs</file_path>"));
    assert!(xml.contains("<suggestions>"));
}

#[test]
fn test_xml_output_escapes_markup() {
    let reviews = vec![FileReview {
        file_path: "tmpl.rs".to_string(),
        suggestions: "1. escape <html> & \"quotes\"\n".to_string(),
    }];
    let xml = export::render(&reviews, OutputFormat::Xml).unwrap();

    assert!(xml.contains("&lt;html&gt;"));
    assert!(xml.contains("&amp;"));
    assert!(!xml.contains("<html>"));
}

#[test]
fn test_text_output_tabulates_all_rows() {
    let table = export::render(&sample_reviews(), OutputFormat::Text).unwrap();

    assert!(table.contains("File path"));
    assert!(table.contains("Suggestions"));
    assert!(table.contains("src/main.rs"));
    assert!(table.contains("src/util/strings.rs"));
    assert!(table.contains("1. prefer &str parameters"));
}

#[test]
fn test_text_output_caps_column_widths() {
    let reviews = vec![FileReview {
        file_path: "deeply/".repeat(20) + "file.rs",
        suggestions: "1. ".to_string() + &"very long advice ".repeat(30),
    }];
    let table = export::render(&reviews, OutputFormat::Text).unwrap();

    // 50-char path column + 100-char suggestion column + borders
    for line in table.lines() {
        assert!(
            line.chars().count() <= 157,
            "over-wide line: {:?}",
            line
        );
    }
}

#[test]
fn test_empty_results_render_in_every_format() {
    let empty: Vec<FileReview> = Vec::new();

    let json = export::render(&empty, OutputFormat::Json).unwrap();
    assert_eq!(json.trim(), "[]");

    let xml = export::render(&empty, OutputFormat::Xml).unwrap();
    assert_eq!(xml, "<results></results>");

    let table = export::render(&empty, OutputFormat::Text).unwrap();
    assert!(table.contains("File path"));
}

#[test]
fn test_exported_file_matches_stdout_rendering() {
    let temp = tempfile::TempDir::new().unwrap();
    let reviews = sample_reviews();

    let rendered = export::render(&reviews, OutputFormat::Xml).unwrap();
    let path = export::write_output(&reviews, OutputFormat::Xml, Some(temp.path()))
        .unwrap()
        .expect("should export");

    assert_eq!(std::fs::read_to_string(path).unwrap(), rendered);
}
