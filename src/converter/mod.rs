//! Converter module - video to MP3 conversion through FFmpeg

pub mod config;
pub mod engine;
pub mod error;
pub mod ffmpeg;
pub mod guard;
pub mod types;
pub mod video_to_audio;

pub use config::*;
pub use engine::TranscodeEngine;
pub use error::{classify_engine_failure, summarize_diagnostics, ConvertError, ErrorKind};
pub use ffmpeg::FfmpegEngine;
pub use guard::{ChildGuard, PartialOutputGuard};
pub use types::*;
pub use video_to_audio::Converter;
