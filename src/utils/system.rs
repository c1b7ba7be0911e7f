//! Environment checks: engine presence, output directory and free disk space

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::converter::ConvertError;

/// Whether `program -version` runs and exits successfully.
pub fn verify_engine_available(program: &Path) -> bool {
    match Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            log::debug!("{} -version failed: {}", program.display(), e);
            false
        }
    }
}

/// Create `dir` if needed and check that it is a writable directory.
pub fn ensure_output_directory(dir: &Path) -> Result<(), ConvertError> {
    fs::create_dir_all(dir).map_err(|e| ConvertError::output_directory(dir, e.to_string()))?;

    let metadata =
        fs::metadata(dir).map_err(|e| ConvertError::output_directory(dir, e.to_string()))?;

    if !metadata.is_dir() {
        return Err(ConvertError::output_directory(dir, "not a directory"));
    }
    if metadata.permissions().readonly() {
        return Err(ConvertError::output_directory(dir, "directory is read-only"));
    }
    Ok(())
}

/// Free bytes available to unprivileged users on the filesystem holding `path`.
#[cfg(unix)]
pub fn available_space(path: &Path) -> std::io::Result<u64> {
    let stat = rustix::fs::statvfs(path).map_err(std::io::Error::from)?;
    Ok(stat.f_bavail.saturating_mul(stat.f_frsize))
}

#[cfg(not(unix))]
pub fn available_space(_path: &Path) -> std::io::Result<u64> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "free space query not supported on this platform",
    ))
}

/// Whether free space under `output_directory` exceeds `estimated_bytes`.
///
/// Best effort: when free space cannot be determined the check passes.
pub fn check_disk_space(output_directory: &Path, estimated_bytes: u64) -> bool {
    match available_space(output_directory) {
        Ok(free) => {
            log::debug!(
                "{} has {} bytes free, need {}",
                output_directory.display(),
                free,
                estimated_bytes
            );
            free > estimated_bytes
        }
        Err(e) => {
            log::warn!(
                "Could not determine free space at {}: {}",
                output_directory.display(),
                e
            );
            true
        }
    }
}
