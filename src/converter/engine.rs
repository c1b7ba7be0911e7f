//! Trait definitions for the external transcoding engine.

use std::path::Path;

use super::error::ConvertError;
use super::types::{EngineOutput, MediaInfo, TranscodeJob};

/// An external program that can transcode and probe media files.
///
/// Calls are blocking: `transcode` returns only once the engine process has
/// exited.
pub trait TranscodeEngine {
    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Whether the engine can be invoked at all.
    fn is_available(&self) -> bool;

    /// Runs one transcode job and reports the exit status and diagnostics.
    ///
    /// An `Err` means the process could not be run; an unsuccessful exit is
    /// reported through [`EngineOutput`].
    fn transcode(&self, job: &TranscodeJob) -> Result<EngineOutput, ConvertError>;

    /// Reads metadata for a media file.
    fn probe(&self, path: &Path) -> Result<MediaInfo, ConvertError>;
}

impl<E: TranscodeEngine + ?Sized> TranscodeEngine for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn transcode(&self, job: &TranscodeJob) -> Result<EngineOutput, ConvertError> {
        (**self).transcode(job)
    }

    fn probe(&self, path: &Path) -> Result<MediaInfo, ConvertError> {
        (**self).probe(path)
    }
}
