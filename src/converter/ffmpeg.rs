//! FFmpeg-based engine implementation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::config::ConverterConfig;
use super::engine::TranscodeEngine;
use super::error::ConvertError;
use super::guard::ChildGuard;
use super::types::{display_name, EngineOutput, MediaInfo, TranscodeJob};
use crate::utils::verify_engine_available;

/// Runs `ffmpeg` and `ffprobe` as blocking child processes.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegEngine {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(&config.ffmpeg_program, &config.ffprobe_program)
    }

    /// Builds ffmpeg arguments that drop the video stream and encode audio.
    pub fn build_args(job: &TranscodeJob) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            job.input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-acodec".to_string(),
            job.audio_codec.clone(),
            "-b:a".to_string(),
            job.bitrate.as_str().to_string(),
            "-ar".to_string(),
            job.sample_rate_hz.to_string(),
            job.output.to_string_lossy().to_string(),
        ]
    }

    /// Parses `ffprobe -print_format json` output into MediaInfo.
    pub fn parse_probe_output(path: &Path, output: &str) -> Result<MediaInfo, ConvertError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: Option<String>,
            duration: Option<String>,
            size: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            codec_name: Option<String>,
            bit_rate: Option<String>,
            sample_rate: Option<String>,
        }

        let probe: ProbeOutput = serde_json::from_str(output).map_err(|e| {
            ConvertError::probe_failed(path, format!("unreadable ffprobe output: {}", e))
        })?;

        let stream_of = |kind: &str| {
            probe
                .streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some(kind))
        };
        let audio = stream_of("audio");
        let video = stream_of("video");

        let file_size_bytes = probe
            .format
            .size
            .as_deref()
            .and_then(|s| s.parse::<u64>().ok())
            .or_else(|| std::fs::metadata(path).ok().map(|m| m.len()))
            .unwrap_or(0);

        Ok(MediaInfo {
            file_name: display_name(path),
            file_size_bytes,
            duration_seconds: probe
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok()),
            container_format_name: probe
                .format
                .format_name
                .unwrap_or_else(|| "unknown".to_string()),
            video_codec: video.and_then(|s| s.codec_name.clone()),
            audio_codec: audio.and_then(|s| s.codec_name.clone()),
            audio_bitrate_bps: audio
                .and_then(|s| s.bit_rate.as_deref())
                .and_then(|b| b.parse::<u64>().ok()),
            sample_rate_hz: audio
                .and_then(|s| s.sample_rate.as_deref())
                .and_then(|r| r.parse::<u32>().ok()),
        })
    }

    fn spawn_error(&self, source: &Path, e: std::io::Error) -> ConvertError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::EngineNotFound {
                program: self.ffmpeg.clone(),
            }
        } else {
            ConvertError::conversion_failed(source, format!("failed to start FFmpeg: {}", e), "")
        }
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::from_config(&ConverterConfig::default())
    }
}

impl TranscodeEngine for FfmpegEngine {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn is_available(&self) -> bool {
        verify_engine_available(&self.ffmpeg)
    }

    fn transcode(&self, job: &TranscodeJob) -> Result<EngineOutput, ConvertError> {
        let args = Self::build_args(job);
        log::debug!("Running {} {:?}", self.ffmpeg.display(), args);

        let child = Command::new(&self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(&job.input, e))?;

        // Killed and reaped on drop if anything below fails before wait().
        let mut guard = ChildGuard::new(child);

        let mut diagnostics = String::new();
        if let Some(stderr) = guard.child_mut().and_then(|c| c.stderr.as_mut()) {
            let mut raw = Vec::new();
            stderr.read_to_end(&mut raw).map_err(|e| {
                ConvertError::conversion_failed(
                    &job.input,
                    format!("failed to read FFmpeg output: {}", e),
                    "",
                )
            })?;
            diagnostics = String::from_utf8_lossy(&raw).into_owned();
        }

        let status = guard.wait().map_err(|e| {
            ConvertError::conversion_failed(
                &job.input,
                format!("failed to wait for FFmpeg: {}", e),
                &diagnostics,
            )
        })?;

        log::debug!("FFmpeg exited with {:?}", status.code());
        Ok(EngineOutput {
            exit_code: status.code(),
            diagnostics,
        })
    }

    fn probe(&self, path: &Path) -> Result<MediaInfo, ConvertError> {
        if !path.is_file() {
            return Err(ConvertError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ConvertError::probe_failed(
                    path,
                    format!("failed to run {}: {}", self.ffprobe.display(), e),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::probe_failed(
                path,
                format!("ffprobe failed: {}", stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Bitrate;

    fn job(bitrate: Bitrate) -> TranscodeJob {
        TranscodeJob {
            input: PathBuf::from("/movie/clip.mp4"),
            output: PathBuf::from("/mp3/clip.mp3"),
            audio_codec: "libmp3lame".to_string(),
            bitrate,
            sample_rate_hz: 44_100,
        }
    }

    #[test]
    fn test_build_args_strips_video_and_sets_audio() {
        let args = FfmpegEngine::build_args(&job(Bitrate::Kbps320));

        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"-y".to_string()));
        assert!(args.contains(&"-nostdin".to_string()));
        assert!(args.windows(2).any(|w| w == ["-acodec", "libmp3lame"]));
        assert!(args.windows(2).any(|w| w == ["-b:a", "320k"]));
        assert!(args.windows(2).any(|w| w == ["-ar", "44100"]));
        assert!(args.windows(2).any(|w| w == ["-i", "/movie/clip.mp4"]));
        assert_eq!(args.last().map(String::as_str), Some("/mp3/clip.mp3"));
    }

    #[test]
    fn test_parse_probe_output_video() {
        let json = r#"{
            "streams": [
                {"codec_type": "video", "codec_name": "h264", "width": 1920},
                {"codec_type": "audio", "codec_name": "aac", "bit_rate": "128000", "sample_rate": "48000"}
            ],
            "format": {"format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "120.5", "size": "10485760"}
        }"#;

        let info = FfmpegEngine::parse_probe_output(Path::new("/movie/test.mp4"), json).unwrap();

        assert_eq!(info.file_name, "test.mp4");
        assert_eq!(info.file_size_bytes, 10_485_760);
        assert_eq!(info.duration_seconds, Some(120.5));
        assert_eq!(info.container_format_name, "mov,mp4,m4a,3gp,3g2,mj2");
        assert_eq!(info.video_codec.as_deref(), Some("h264"));
        assert_eq!(info.audio_codec.as_deref(), Some("aac"));
        assert_eq!(info.audio_bitrate_bps, Some(128_000));
        assert_eq!(info.sample_rate_hz, Some(48_000));
        assert_eq!(info.duration(), "02:00");
    }

    #[test]
    fn test_parse_probe_output_audio_only() {
        let json = r#"{
            "streams": [{"codec_type": "audio", "codec_name": "mp3"}],
            "format": {"format_name": "mp3", "duration": "3661.0", "size": "2048"}
        }"#;

        let info = FfmpegEngine::parse_probe_output(Path::new("song.mp3"), json).unwrap();

        assert!(info.video_codec.is_none());
        assert_eq!(info.audio_codec.as_deref(), Some("mp3"));
        assert_eq!(info.duration(), "01:01:01");
    }

    #[test]
    fn test_parse_probe_output_garbage() {
        let err = FfmpegEngine::parse_probe_output(Path::new("x.mp4"), "not json").unwrap_err();
        assert!(matches!(err, ConvertError::ProbeFailed { .. }));
    }

    #[test]
    fn test_missing_engine_is_unavailable() {
        let engine = FfmpegEngine::new("/nonexistent/ffmpeg-binary", "/nonexistent/ffprobe");
        assert!(!engine.is_available());
    }
}
