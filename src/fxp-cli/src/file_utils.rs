//! Input file discovery

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Extensions picked up from an input directory (case-insensitive)
pub const PRESET_EXTENSIONS: &[&str] = &["fxp", "fxb"];

/// Collect files directly inside `path` whose extension matches
///
/// Extension should not include the dot (e.g., "fxp" not ".fxp"). Does not
/// descend into subdirectories. Results are sorted by file name.
pub fn collect_files_with_extension(path: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(path).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to list {}", path.display()))?;
        // Follows symlinks; dangling links are skipped
        if !entry.path().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);

        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Inputs for a run: the file itself, or the presets in a directory
pub fn collect_preset_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("{} is not a file or directory", path.display());
    }

    collect_files_with_extension(path, PRESET_EXTENSIONS)
}

/// Preset name for a source file: its file name without the extension
pub fn preset_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
