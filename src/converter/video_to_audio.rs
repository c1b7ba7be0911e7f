//! Video to MP3 conversion lifecycle.
//!
//! `Converter` owns the pre-flight checks, the engine invocation and the
//! classification of engine failures. Each call to
//! [`Converter::convert_file`] walks a request through
//! `Created -> Validated -> Invoking -> {Succeeded | Failed}` and always
//! yields a [`ConversionResult`]; nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use super::config::ConverterConfig;
use super::engine::TranscodeEngine;
use super::error::{classify_engine_failure, ConvertError};
use super::guard::PartialOutputGuard;
use super::types::{
    Bitrate, ConversionRequest, ConversionResult, ConversionState, MediaInfo, TranscodeJob,
};
use crate::utils::{
    check_disk_space, derive_output_path, ensure_output_directory, format_file_size,
    is_supported,
};

/// Converts video files to MP3 through a [`TranscodeEngine`].
#[derive(Debug)]
pub struct Converter<E> {
    config: ConverterConfig,
    engine: E,
}

/// Tracks the state of a single conversion.
struct Attempt<'a> {
    source: &'a Path,
    state: ConversionState,
    started: Instant,
}

impl<'a> Attempt<'a> {
    fn new(source: &'a Path) -> Self {
        Self {
            source,
            state: ConversionState::Created,
            started: Instant::now(),
        }
    }

    fn advance(&mut self, next: ConversionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        log::debug!("{}: {} -> {}", self.source.display(), self.state, next);
        self.state = next;
    }

    fn fail(mut self, output_path: Option<PathBuf>, error: ConvertError) -> ConversionResult {
        self.advance(ConversionState::Failed);
        log::info!("Conversion of {} failed: {}", self.source.display(), error);
        ConversionResult::failure(
            self.source.to_path_buf(),
            output_path,
            error,
            self.started.elapsed(),
        )
    }
}

impl<E: TranscodeEngine> Converter<E> {
    /// Verifies the engine and prepares the default output directory.
    ///
    /// Running it again against a ready environment changes nothing.
    pub fn new(config: ConverterConfig, engine: E) -> Result<Self, ConvertError> {
        if !engine.is_available() {
            return Err(ConvertError::EngineNotFound {
                program: config.ffmpeg_program.clone(),
            });
        }
        ensure_output_directory(&config.output_dir)?;
        log::info!(
            "Converter ready ({}), output directory {}",
            engine.name(),
            config.output_dir.display()
        );
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Builds a request for `source` using the configured output directory.
    pub fn request(
        &self,
        source: impl Into<PathBuf>,
        bitrate: impl Into<String>,
    ) -> ConversionRequest {
        ConversionRequest::new(source, &self.config.output_dir, bitrate)
    }

    /// Converts one file. Failures are returned inside the result.
    pub fn convert_file(&self, request: &ConversionRequest) -> ConversionResult {
        let source = request.source_path.as_path();
        let mut attempt = Attempt::new(source);

        let (bitrate, source_size) = match self.preflight(request) {
            Ok(checked) => checked,
            Err(e) => return attempt.fail(None, e),
        };

        let output_path = derive_output_path(source, &request.output_directory);

        let required = source_size.saturating_add(self.config.reserved_space_bytes);
        if !check_disk_space(&request.output_directory, required) {
            let error = ConvertError::InsufficientDiskSpace {
                path: request.output_directory.clone(),
                detail: format!("at least {} required", format_file_size(required)),
            };
            return attempt.fail(Some(output_path), error);
        }

        attempt.advance(ConversionState::Validated);

        // The engine writes to a staging file; the real output only changes on commit.
        let guard = match PartialOutputGuard::new(&output_path) {
            Ok(guard) => guard,
            Err(e) => {
                let error = ConvertError::output_directory(
                    &request.output_directory,
                    format!("cannot create staging file: {}", e),
                );
                return attempt.fail(Some(output_path), error);
            }
        };

        let job = TranscodeJob {
            input: source.to_path_buf(),
            output: guard.staging_path().to_path_buf(),
            audio_codec: self.config.audio_codec.clone(),
            bitrate,
            sample_rate_hz: self.config.sample_rate_hz,
        };

        attempt.advance(ConversionState::Invoking);
        log::info!(
            "Converting {} -> {} at {}",
            source.display(),
            output_path.display(),
            bitrate
        );

        let output = match self.engine.transcode(&job) {
            Ok(output) => output,
            Err(e) => return attempt.fail(Some(output_path), e),
        };

        if !output.succeeded() {
            let error = classify_engine_failure(
                source,
                &output_path,
                output.exit_code,
                &output.diagnostics,
            );
            return attempt.fail(Some(output_path), error);
        }

        let output_size = match fs::metadata(guard.staging_path()) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => meta.len(),
            _ => {
                let error = ConvertError::conversion_failed(
                    source,
                    "FFmpeg reported success but produced no output file",
                    &output.diagnostics,
                );
                return attempt.fail(Some(output_path), error);
            }
        };

        let output_path = match guard.commit() {
            Ok(path) => path,
            Err(e) => {
                let error = ConvertError::output_directory(
                    &request.output_directory,
                    format!("cannot move output into place: {}", e),
                );
                return attempt.fail(Some(output_path), error);
            }
        };

        let duration_seconds = match self.engine.probe(&output_path) {
            Ok(info) => info.duration_seconds,
            Err(e) => {
                log::warn!("Could not probe {}: {}", output_path.display(), e);
                None
            }
        };

        attempt.advance(ConversionState::Succeeded);
        log::info!(
            "Converted {} in {:.1}s",
            source.display(),
            attempt.started.elapsed().as_secs_f64()
        );

        ConversionResult::success(
            source.to_path_buf(),
            output_path,
            duration_seconds,
            Some(output_size),
            attempt.started.elapsed(),
        )
    }

    /// Reads metadata for `path` without touching it.
    pub fn probe_info(&self, path: &Path) -> Result<MediaInfo, ConvertError> {
        self.engine.probe(path)
    }

    /// Source, format, bitrate and output directory checks, in that order.
    fn preflight(&self, request: &ConversionRequest) -> Result<(Bitrate, u64), ConvertError> {
        let source = &request.source_path;

        let metadata = match fs::metadata(source) {
            Ok(meta) if meta.is_file() => meta,
            _ => {
                return Err(ConvertError::SourceNotFound {
                    path: source.clone(),
                })
            }
        };

        if !is_supported(source) {
            let extension = source
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            return Err(ConvertError::UnsupportedFormat {
                path: source.clone(),
                extension,
            });
        }

        let bitrate = Bitrate::from_str(&request.bitrate)?;

        ensure_output_directory(&request.output_directory)?;

        Ok((bitrate, metadata.len()))
    }
}
