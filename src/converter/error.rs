//! Error types for the converter module.
//!
//! Every failure that crosses the converter boundary is one of the
//! `ConvertError` variants. Callers dispatch on the variant (or on
//! [`ErrorKind`]) rather than on the message text.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Number of trailing diagnostic lines kept when summarising engine output.
pub const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// Errors that can occur while preparing, running or inspecting a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The transcoding engine could not be invoked.
    #[error("FFmpeg not found or not runnable: {program}. Install it from https://ffmpeg.org/download.html")]
    EngineNotFound { program: PathBuf },

    /// Source extension is not in the supported set.
    #[error("Unsupported format '{extension}' (file: {path})")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Source does not exist or is not a regular file.
    #[error("Input file not found (file: {path})")]
    SourceNotFound { path: PathBuf },

    /// Directory to scan does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Not enough free space where the output would be written.
    #[error("Insufficient disk space at {path}: {detail}")]
    InsufficientDiskSpace { path: PathBuf, detail: String },

    /// Bitrate outside the accepted set.
    #[error("Invalid bitrate '{value}'. Available: 128k, 192k, 256k, 320k")]
    InvalidBitrate { value: String },

    /// The engine exited unsuccessfully or produced no output.
    #[error("Conversion failed: {reason} (file: {path})")]
    ConversionFailed {
        path: PathBuf,
        reason: String,
        diagnostics: String,
    },

    /// Output directory could not be created or is not writable.
    #[error("Output directory error at {path}: {reason}")]
    OutputDirectoryError { path: PathBuf, reason: String },

    /// Metadata probe could not read the file.
    #[error("Failed to read media info: {reason} (file: {path})")]
    ProbeFailed { path: PathBuf, reason: String },

    /// The engine was denied access to a file.
    #[error("Permission denied while converting (file: {path})")]
    PermissionDenied { path: PathBuf, diagnostics: String },

    /// The file is locked by another process.
    #[error("File is in use by another process (file: {path})")]
    FileInUse { path: PathBuf, diagnostics: String },
}

/// Fieldless discriminant of [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EngineNotFound,
    UnsupportedFormat,
    SourceNotFound,
    DirectoryNotFound,
    InsufficientDiskSpace,
    InvalidBitrate,
    ConversionFailed,
    OutputDirectoryError,
    ProbeFailed,
    PermissionDenied,
    FileInUse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::EngineNotFound => "engine not found",
            ErrorKind::UnsupportedFormat => "unsupported format",
            ErrorKind::SourceNotFound => "source not found",
            ErrorKind::DirectoryNotFound => "directory not found",
            ErrorKind::InsufficientDiskSpace => "insufficient disk space",
            ErrorKind::InvalidBitrate => "invalid bitrate",
            ErrorKind::ConversionFailed => "conversion failed",
            ErrorKind::OutputDirectoryError => "output directory error",
            ErrorKind::ProbeFailed => "probe failed",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::FileInUse => "file in use",
        };
        f.write_str(label)
    }
}

impl ConvertError {
    /// Creates a conversion failure carrying summarised engine diagnostics.
    pub fn conversion_failed(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        diagnostics: &str,
    ) -> Self {
        Self::ConversionFailed {
            path: path.into(),
            reason: reason.into(),
            diagnostics: summarize_diagnostics(diagnostics, DIAGNOSTIC_TAIL_LINES),
        }
    }

    /// Creates a probe failure.
    pub fn probe_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an output directory failure.
    pub fn output_directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OutputDirectoryError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EngineNotFound { .. } => ErrorKind::EngineNotFound,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            Self::DirectoryNotFound { .. } => ErrorKind::DirectoryNotFound,
            Self::InsufficientDiskSpace { .. } => ErrorKind::InsufficientDiskSpace,
            Self::InvalidBitrate { .. } => ErrorKind::InvalidBitrate,
            Self::ConversionFailed { .. } => ErrorKind::ConversionFailed,
            Self::OutputDirectoryError { .. } => ErrorKind::OutputDirectoryError,
            Self::ProbeFailed { .. } => ErrorKind::ProbeFailed,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::FileInUse { .. } => ErrorKind::FileInUse,
        }
    }

    /// The path this error concerns, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::EngineNotFound { program } => Some(program),
            Self::UnsupportedFormat { path, .. }
            | Self::SourceNotFound { path }
            | Self::DirectoryNotFound { path }
            | Self::InsufficientDiskSpace { path, .. }
            | Self::ConversionFailed { path, .. }
            | Self::OutputDirectoryError { path, .. }
            | Self::ProbeFailed { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::FileInUse { path, .. } => Some(path),
            Self::InvalidBitrate { .. } => None,
        }
    }

    /// Engine diagnostics attached to this error, if any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::ConversionFailed { diagnostics, .. }
            | Self::PermissionDenied { diagnostics, .. }
            | Self::FileInUse { diagnostics, .. } => {
                Some(diagnostics.as_str()).filter(|d| !d.is_empty())
            }
            _ => None,
        }
    }

    /// Whether this error stops the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EngineNotFound { .. })
    }

    /// Whether this error was raised before any engine process was spawned.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. }
                | Self::SourceNotFound { .. }
                | Self::InvalidBitrate { .. }
                | Self::InsufficientDiskSpace { .. }
                | Self::OutputDirectoryError { .. }
        )
    }
}

/// Maps an unsuccessful engine run onto the most specific error variant.
///
/// `path` is the source being converted, `output` the destination that was
/// being written (reported for disk-space failures).
pub fn classify_engine_failure(
    path: &Path,
    output: &Path,
    exit_code: Option<i32>,
    diagnostics: &str,
) -> ConvertError {
    let summary = summarize_diagnostics(diagnostics, DIAGNOSTIC_TAIL_LINES);

    if diagnostics.contains("Permission denied") || diagnostics.contains("Access is denied") {
        return ConvertError::PermissionDenied {
            path: path.to_path_buf(),
            diagnostics: summary,
        };
    }

    if diagnostics.contains("Resource busy")
        || diagnostics.contains("being used by another process")
    {
        return ConvertError::FileInUse {
            path: path.to_path_buf(),
            diagnostics: summary,
        };
    }

    if diagnostics.contains("No space left") {
        return ConvertError::InsufficientDiskSpace {
            path: output.to_path_buf(),
            detail: "no space left on device while writing output".to_string(),
        };
    }

    let reason = match exit_code {
        Some(code) => format!("FFmpeg exited with status {}", code),
        None => "FFmpeg was terminated by a signal".to_string(),
    };

    ConvertError::ConversionFailed {
        path: path.to_path_buf(),
        reason,
        diagnostics: summary,
    }
}

/// Keeps the last `max_lines` non-empty lines of engine output.
pub fn summarize_diagnostics(diagnostics: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = diagnostics
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();

    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
