//! Converter configuration.

use std::path::PathBuf;

/// Default directory receiving converted files.
pub const DEFAULT_OUTPUT_DIR: &str = "mp3";

/// Default directory scanned for input videos.
pub const DEFAULT_MOVIE_DIR: &str = "movie";

/// Configuration for the converter and its FFmpeg engine.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Directory created at start-up and used for outputs by default.
    pub output_dir: PathBuf,
    /// FFmpeg executable name or path.
    pub ffmpeg_program: PathBuf,
    /// FFprobe executable name or path.
    pub ffprobe_program: PathBuf,
    /// Audio encoder passed to `-acodec`.
    pub audio_codec: String,
    /// Output sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Free space to keep on top of the per-file estimate.
    pub reserved_space_bytes: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ffmpeg_program: PathBuf::from("ffmpeg"),
            ffprobe_program: PathBuf::from("ffprobe"),
            audio_codec: "libmp3lame".to_string(),
            sample_rate_hz: 44_100,
            reserved_space_bytes: 0,
        }
    }
}

impl ConverterConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_ffmpeg(mut self, program: impl Into<PathBuf>) -> Self {
        self.ffmpeg_program = program.into();
        self
    }

    pub fn with_reserved_space(mut self, bytes: u64) -> Self {
        self.reserved_space_bytes = bytes;
        self
    }

    pub fn with_ffprobe(mut self, program: impl Into<PathBuf>) -> Self {
        self.ffprobe_program = program.into();
        self
    }
}
