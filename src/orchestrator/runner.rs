//! Drives conversions one file at a time and collects the outcomes.

use std::path::{Path, PathBuf};

use crate::converter::types::display_name;
use crate::converter::{
    ConversionRequest, ConversionResult, ConvertError, Converter, TranscodeEngine,
};
use crate::report::{display_candidates, display_media_info, BatchReport};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, list_candidates, print_diagnostics,
    print_error, print_file_header, print_hint, print_info, supported_formats_display,
};

/// Per-run settings shared by every conversion.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory scanned for candidates in listing, batch and interactive modes.
    pub movie_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Raw bitrate string; validated per request by the converter.
    pub bitrate: String,
    /// Print probed metadata before each conversion.
    pub show_info: bool,
}

/// Sequential conversion driver.
///
/// Exactly one engine process runs at a time. A failed file is recorded and
/// the next file is processed, except after a fatal error.
pub struct Orchestrator<'a, E> {
    converter: &'a Converter<E>,
    options: RunOptions,
}

impl<'a, E: TranscodeEngine> Orchestrator<'a, E> {
    pub fn new(converter: &'a Converter<E>, options: RunOptions) -> Self {
        Self { converter, options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn converter(&self) -> &Converter<E> {
        self.converter
    }

    fn request_for(&self, source: &Path) -> ConversionRequest {
        ConversionRequest::new(source, &self.options.output_dir, self.options.bitrate.clone())
            .with_show_info(self.options.show_info)
    }

    /// Convert one file, printing progress and the outcome.
    pub fn convert_one(&self, source: &Path) -> ConversionResult {
        let request = self.request_for(source);
        let name = display_name(source);

        print_file_header(&name);

        if request.show_info && source.is_file() {
            match self.converter.probe_info(source) {
                Ok(info) => display_media_info(&info),
                Err(e) => print_error(&e.to_string()),
            }
        }

        let spinner = create_spinner(&format!("Converting {}...", name));
        let result = self.converter.convert_file(&request);

        match (&result.failure, &result.output_path) {
            (None, Some(output)) => {
                finish_with_success(&spinner, &format!("Saved to {}", output.display()));
            }
            (Some(error), _) => {
                finish_with_failure(&spinner, &format!("{} ({})", name, error.kind()));
                report_failure(error);
            }
            (None, None) => finish_with_success(&spinner, "Done"),
        }

        result
    }

    /// Single-file mode.
    pub fn run_single(&self, source: &Path) -> BatchReport {
        let mut report = BatchReport::new(1);
        report.record(self.convert_one(source));
        report
    }

    /// Convert `sources` in order, continuing past per-file failures.
    pub fn run_batch(&self, sources: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::new(sources.len());

        for (i, source) in sources.iter().enumerate() {
            log::debug!("Batch item {}/{}: {}", i + 1, sources.len(), source.display());
            let result = self.convert_one(source);
            let fatal = result.failure.as_ref().is_some_and(ConvertError::is_fatal);
            report.record(result);

            if fatal {
                print_error(&format!(
                    "Stopping batch: {} file(s) not processed",
                    sources.len() - (i + 1)
                ));
                break;
            }
        }

        report
    }

    /// Batch mode over every candidate in the movie directory.
    pub fn run_all(&self) -> Result<BatchReport, ConvertError> {
        let candidates = list_candidates(&self.options.movie_dir)?;
        if candidates.is_empty() {
            print_no_candidates(&self.options.movie_dir);
        }
        Ok(self.run_batch(&candidates))
    }
}

/// Listing mode: show candidates without converting.
pub fn list_mode(movie_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let candidates = list_candidates(movie_dir)?;
    if candidates.is_empty() {
        print_no_candidates(movie_dir);
    } else {
        display_candidates(movie_dir, &candidates);
    }
    Ok(candidates)
}

/// Guidance shown when a directory holds no convertible files.
pub fn print_no_candidates(movie_dir: &Path) {
    println!();
    print_error(&format!("No convertible video files in {}", movie_dir.display()));
    print_info(&format!("Supported formats: {}", supported_formats_display()));
    print_hint(&format!(
        "place video files in {} and run again",
        movie_dir.display()
    ));
}

/// Print a failure with its path and, for engine errors, the diagnostics.
pub fn report_failure(error: &ConvertError) {
    print_error(&error.to_string());
    if let Some(diagnostics) = error.diagnostics() {
        print_diagnostics(diagnostics);
    }
}
