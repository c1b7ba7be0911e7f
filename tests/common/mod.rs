//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use mp4tomp3::cli::SelectionSource;
use mp4tomp3::converter::{
    ConvertError, ConverterConfig, EngineOutput, MediaInfo, TranscodeEngine, TranscodeJob,
};
use tempfile::TempDir;

/// What the fake engine does on its next transcode call
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Write a complete output file and exit 0
    Succeed,
    /// Exit non-zero without writing anything
    Fail { exit_code: i32, diagnostics: String },
    /// Write part of the output, then exit non-zero
    CrashMidWrite { diagnostics: String },
    /// Exit 0 without writing an output file
    SucceedWithoutOutput,
}

impl FakeBehavior {
    pub fn fail(diagnostics: &str) -> Self {
        FakeBehavior::Fail {
            exit_code: 1,
            diagnostics: diagnostics.to_string(),
        }
    }
}

/// In-process stand-in for FFmpeg that records every invocation
#[derive(Debug)]
pub struct FakeEngine {
    pub available: bool,
    pub duration_seconds: Option<f64>,
    script: RefCell<VecDeque<FakeBehavior>>,
    invocations: RefCell<Vec<TranscodeJob>>,
    probes: RefCell<Vec<PathBuf>>,
}

impl FakeEngine {
    /// Engine that succeeds on every call
    pub fn new() -> Self {
        Self {
            available: true,
            duration_seconds: Some(62.0),
            script: RefCell::new(VecDeque::new()),
            invocations: RefCell::new(Vec::new()),
            probes: RefCell::new(Vec::new()),
        }
    }

    /// Engine that plays `behaviors` in order, then succeeds
    pub fn scripted(behaviors: Vec<FakeBehavior>) -> Self {
        let engine = Self::new();
        engine.script.borrow_mut().extend(behaviors);
        engine
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.borrow().len()
    }

    pub fn invocations(&self) -> Vec<TranscodeJob> {
        self.invocations.borrow().clone()
    }

    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probes.borrow().clone()
    }
}

impl TranscodeEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn transcode(&self, job: &TranscodeJob) -> Result<EngineOutput, ConvertError> {
        self.invocations.borrow_mut().push(job.clone());
        let behavior = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or(FakeBehavior::Succeed);

        match behavior {
            FakeBehavior::Succeed => {
                fs::write(&job.output, b"ID3\x04\x00fake mp3 frames").unwrap();
                Ok(EngineOutput::success())
            }
            FakeBehavior::Fail {
                exit_code,
                diagnostics,
            } => Ok(EngineOutput::failed(exit_code, diagnostics)),
            FakeBehavior::CrashMidWrite { diagnostics } => {
                fs::write(&job.output, b"ID3\x04\x00trunc").unwrap();
                Ok(EngineOutput::failed(1, diagnostics))
            }
            FakeBehavior::SucceedWithoutOutput => Ok(EngineOutput::success()),
        }
    }

    fn probe(&self, path: &Path) -> Result<MediaInfo, ConvertError> {
        self.probes.borrow_mut().push(path.to_path_buf());
        let metadata = fs::metadata(path).map_err(|_| ConvertError::SourceNotFound {
            path: path.to_path_buf(),
        })?;
        Ok(MediaInfo {
            file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
            file_size_bytes: metadata.len(),
            duration_seconds: self.duration_seconds,
            container_format_name: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
            video_codec: Some("h264".to_string()),
            audio_codec: Some("aac".to_string()),
            audio_bitrate_bps: Some(128_000),
            sample_rate_hz: Some(44_100),
        })
    }
}

/// Replays fixed selection input, then reports end of input
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts: usize,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            prompts: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl SelectionSource for ScriptedInput {
    fn next_input(&mut self, _count: usize) -> Result<Option<String>> {
        self.prompts += 1;
        Ok(self.lines.pop_front())
    }
}

/// Temporary workspace with a movie directory and an (absent) output directory
pub struct Workspace {
    pub temp_dir: TempDir,
    pub movie_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let movie_dir = temp_dir.path().join("movie");
        let output_dir = temp_dir.path().join("mp3");
        fs::create_dir(&movie_dir).unwrap();
        Self {
            temp_dir,
            movie_dir,
            output_dir,
        }
    }

    /// Create a dummy video file in the movie directory
    pub fn add_video(&self, name: &str) -> PathBuf {
        create_video(&self.movie_dir, name)
    }

    pub fn config(&self) -> ConverterConfig {
        ConverterConfig::default().with_output_dir(&self.output_dir)
    }

    pub fn output_files(&self) -> Vec<String> {
        list_names(&self.output_dir)
    }
}

/// Write a small placeholder "video" file
pub fn create_video(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![0u8; 4096]).unwrap();
    path
}

/// Sorted file names in a directory (empty if it does not exist)
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
