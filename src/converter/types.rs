//! Types shared by the converter, the engine and the orchestrator.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::error::ConvertError;
use crate::utils::format_duration;

/// MP3 bitrates accepted by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bitrate {
    Kbps128,
    #[default]
    Kbps192,
    Kbps256,
    Kbps320,
}

impl Bitrate {
    pub const ALL: [Bitrate; 4] = [
        Bitrate::Kbps128,
        Bitrate::Kbps192,
        Bitrate::Kbps256,
        Bitrate::Kbps320,
    ];

    /// Value passed to FFmpeg's `-b:a`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bitrate::Kbps128 => "128k",
            Bitrate::Kbps192 => "192k",
            Bitrate::Kbps256 => "256k",
            Bitrate::Kbps320 => "320k",
        }
    }

    pub fn kbps(&self) -> u32 {
        match self {
            Bitrate::Kbps128 => 128,
            Bitrate::Kbps192 => 192,
            Bitrate::Kbps256 => 256,
            Bitrate::Kbps320 => 320,
        }
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bitrate {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bitrate::ALL
            .into_iter()
            .find(|b| b.as_str() == s.trim())
            .ok_or_else(|| ConvertError::InvalidBitrate {
                value: s.to_string(),
            })
    }
}

/// One file to convert. Built right before conversion and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source_path: PathBuf,
    pub output_directory: PathBuf,
    /// Raw bitrate as received; validated by the converter.
    pub bitrate: String,
    pub show_info: bool,
}

impl ConversionRequest {
    pub fn new(
        source_path: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
        bitrate: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            output_directory: output_directory.into(),
            bitrate: bitrate.into(),
            show_info: false,
        }
    }

    pub fn with_show_info(mut self, show_info: bool) -> Self {
        self.show_info = show_info;
        self
    }
}

/// Lifecycle of a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionState {
    Created,
    Validated,
    Invoking,
    Succeeded,
    Failed,
}

impl ConversionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversionState::Succeeded | ConversionState::Failed)
    }

    /// Whether `next` is a legal transition from this state.
    pub fn can_transition_to(&self, next: ConversionState) -> bool {
        use ConversionState::*;
        matches!(
            (self, next),
            (Created, Validated)
                | (Created, Failed)
                | (Validated, Invoking)
                | (Validated, Failed)
                | (Invoking, Succeeded)
                | (Invoking, Failed)
        )
    }
}

impl fmt::Display for ConversionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConversionState::Created => "created",
            ConversionState::Validated => "validated",
            ConversionState::Invoking => "invoking",
            ConversionState::Succeeded => "succeeded",
            ConversionState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome of one conversion. Produced once per request.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub source_path: PathBuf,
    /// Derived output path; `None` when validation failed before derivation.
    pub output_path: Option<PathBuf>,
    pub duration_seconds: Option<f64>,
    pub output_size_bytes: Option<u64>,
    pub elapsed: Duration,
    pub failure: Option<ConvertError>,
}

impl ConversionResult {
    pub fn success(
        source_path: PathBuf,
        output_path: PathBuf,
        duration_seconds: Option<f64>,
        output_size_bytes: Option<u64>,
        elapsed: Duration,
    ) -> Self {
        Self {
            source_path,
            output_path: Some(output_path),
            duration_seconds,
            output_size_bytes,
            elapsed,
            failure: None,
        }
    }

    pub fn failure(
        source_path: PathBuf,
        output_path: Option<PathBuf>,
        error: ConvertError,
        elapsed: Duration,
    ) -> Self {
        Self {
            source_path,
            output_path,
            duration_seconds: None,
            output_size_bytes: None,
            elapsed,
            failure: Some(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn state(&self) -> ConversionState {
        if self.succeeded() {
            ConversionState::Succeeded
        } else {
            ConversionState::Failed
        }
    }

    /// Source file name for display.
    pub fn file_name(&self) -> String {
        display_name(&self.source_path)
    }
}

/// Metadata read from a media file. Display only.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub file_name: String,
    pub file_size_bytes: u64,
    pub duration_seconds: Option<f64>,
    pub container_format_name: String,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub audio_bitrate_bps: Option<u64>,
    pub sample_rate_hz: Option<u32>,
}

impl MediaInfo {
    /// Duration as `HH:MM:SS` or `MM:SS`.
    pub fn duration(&self) -> String {
        match self.duration_seconds {
            Some(secs) => format_duration(secs),
            None => "unknown".to_string(),
        }
    }
}

/// Parameters for one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub audio_codec: String,
    pub bitrate: Bitrate,
    pub sample_rate_hz: u32,
}

/// Raw outcome of an engine process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub diagnostics: String,
}

impl EngineOutput {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            diagnostics: String::new(),
        }
    }

    pub fn failed(exit_code: i32, diagnostics: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            diagnostics: diagnostics.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
