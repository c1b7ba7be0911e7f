//! Supported input formats and output path derivation

use std::fs;
use std::path::{Path, PathBuf};

use crate::converter::ConvertError;

/// Video container extensions accepted as input (lowercase, no dot).
pub const SUPPORTED_EXTENSIONS: [&str; 12] = [
    "mp4", "avi", "mov", "mkv", "wmv", "flv", "webm", "m4v", "3gp", "ts", "mts", "m2ts",
];

/// Extension given to every converted file.
pub const OUTPUT_EXTENSION: &str = "mp3";

/// Whether an extension (with or without leading dot, any case) is supported.
pub fn is_supported_extension(extension: &str) -> bool {
    let normalized = extension.trim_start_matches('.').to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&normalized.as_str())
}

/// Whether the file at `path` has a supported video extension.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(is_supported_extension)
        .unwrap_or(false)
}

/// Supported extensions as a display string, e.g. `.3gp, .avi, ...`.
pub fn supported_formats_display() -> String {
    let mut exts: Vec<&str> = SUPPORTED_EXTENSIONS.to_vec();
    exts.sort_unstable();
    exts.iter()
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(", ")
}

/// List supported video files directly inside `directory`, sorted by path.
///
/// An existing directory without matches yields an empty list.
pub fn list_candidates(directory: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !directory.is_dir() {
        return Err(ConvertError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let entries = fs::read_dir(directory).map_err(|_| ConvertError::DirectoryNotFound {
        path: directory.to_path_buf(),
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported(path))
        .collect();

    candidates.sort();
    Ok(candidates)
}

/// Output path for `source`: same base name, `.mp3` extension, inside `output_directory`.
pub fn derive_output_path(source: &Path, output_directory: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());

    let mut file_name = stem;
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);
    output_directory.join(file_name)
}
