//! File gathering for a review run.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ReviewConfig;

/// Collect the files under `root` eligible for review.
///
/// Hidden directories and the export directory are skipped, plus anything
/// matching the config's excluded_paths globs. No extension filter: the
/// model is asked about whatever text the tree holds.
pub fn collect_files(
    root: &Path,
    config: &ReviewConfig,
    export_dir: Option<&Path>,
) -> anyhow::Result<Vec<PathBuf>> {
    let export_name = export_dir
        .and_then(|d| d.file_name())
        .map(|n| n.to_string_lossy().to_string());

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories
            if e.file_type().is_dir() && name.starts_with('.') && e.depth() > 0 {
                return false;
            }
            // Never re-review our own exports
            if e.file_type().is_dir() {
                if let Some(export) = &export_name {
                    if &*name == export.as_str() {
                        return false;
                    }
                }
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            if config.is_path_excluded(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Render a file path relative to the scan root for result rows.
///
/// A single-file scan reports just the file name.
pub fn relative_path(file_path: &Path, base_path: &Path) -> String {
    if file_path == base_path {
        return file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string_lossy().to_string());
    }

    file_path
        .strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string_lossy().to_string())
}
