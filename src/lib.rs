//! mp4tomp3: Video to MP3 Conversion Library
//!
//! Extracts the audio track of video files into MP3 using an external
//! FFmpeg process, with pre-flight validation, typed failures and
//! all-or-nothing output files.

pub mod cli;
pub mod converter;
pub mod orchestrator;
pub mod report;
pub mod utils;
