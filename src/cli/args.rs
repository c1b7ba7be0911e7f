//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::converter::{DEFAULT_MOVIE_DIR, DEFAULT_OUTPUT_DIR};

/// mp4tomp3 - Convert video files to MP3 audio with FFmpeg.
///
/// Run without arguments to pick files interactively from the movie directory.
#[derive(Parser, Debug)]
#[command(name = "mp4tomp3")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Video file to convert
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// MP3 bitrate: 128k, 192k, 256k or 320k
    #[arg(short, long, default_value = "192k")]
    pub bitrate: String,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Convert every video in the movie directory without prompting
    #[arg(short, long, default_value = "false", conflicts_with = "file")]
    pub all: bool,

    /// Only list the video files in the movie directory
    #[arg(short, long, default_value = "false")]
    pub list: bool,

    /// Show file information before converting
    #[arg(long, default_value = "false")]
    pub info: bool,

    /// Directory scanned for videos in list and interactive modes
    #[arg(short, long, env = "MP4TOMP3_MOVIE_DIR", default_value = DEFAULT_MOVIE_DIR)]
    pub movie_dir: PathBuf,

    /// FFmpeg executable
    #[arg(long, env = "MP4TOMP3_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// FFprobe executable (used for --info)
    #[arg(long, env = "MP4TOMP3_FFPROBE", default_value = "ffprobe")]
    pub ffprobe: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Whether no mode flag was given and the interactive menu should run.
    pub fn is_interactive(&self) -> bool {
        self.file.is_none() && !self.list && !self.all
    }

    /// Default log filter for env_logger.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
