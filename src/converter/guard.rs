//! Scoped cleanup for conversion side effects.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Child;

use tempfile::TempPath;

/// Stages engine output in a temporary sibling of the final file.
///
/// The engine writes to [`staging_path`](Self::staging_path). Only
/// [`commit`](Self::commit) moves it onto the target, so a failed or
/// interrupted run never touches an existing output. On any other exit path
/// the staging file is deleted.
#[derive(Debug)]
pub struct PartialOutputGuard {
    staging: Option<TempPath>,
    target: PathBuf,
}

impl PartialOutputGuard {
    /// Creates an empty staging file next to `target`, keeping its extension.
    pub fn new(target: impl Into<PathBuf>) -> io::Result<Self> {
        let target = target.into();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let suffix = target
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let staging = tempfile::Builder::new()
            .prefix(".mp4tomp3-")
            .suffix(&suffix)
            .tempfile_in(dir)?
            .into_temp_path();

        Ok(Self {
            staging: Some(staging),
            target,
        })
    }

    /// Where the engine should write.
    pub fn staging_path(&self) -> &Path {
        self.staging.as_deref().unwrap_or(&self.target)
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Moves the staged file onto the target, replacing any previous output.
    pub fn commit(mut self) -> io::Result<PathBuf> {
        if let Some(staging) = self.staging.take() {
            staging.persist(&self.target).map_err(|e| e.error)?;
        }
        Ok(std::mem::take(&mut self.target))
    }
}

impl Drop for PartialOutputGuard {
    fn drop(&mut self) {
        let Some(staging) = self.staging.take() else {
            return;
        };
        let path = staging.to_path_buf();
        match staging.close() {
            Ok(()) => log::info!("Removed partial output {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove partial output {}: {}", path.display(), e),
        }
    }
}

/// Kills and reaps a child process that was not waited on.
#[derive(Debug)]
pub struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    pub fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    pub fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    /// Waits for the child to exit and disarms the guard.
    pub fn wait(mut self) -> io::Result<std::process::ExitStatus> {
        match self.child.take() {
            Some(mut child) => child.wait(),
            None => Err(io::Error::other("child process already reaped")),
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            log::warn!("Terminating engine process {}", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
