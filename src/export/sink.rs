//! Export sinks
//!
//! Where a rendered export goes once it leaves the crate.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{error, info};

use super::ExportedFile;

/// Errors delivering an export.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The suggested name would escape the target directory.
    #[error("refusing to write export named {0:?}")]
    InvalidFilename(String),

    /// The export could not be written.
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
}

/// Delivers rendered exports.
pub trait ExportSink {
    /// Deliver `file`.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the file could not be delivered.
    fn deliver(&mut self, file: &ExportedFile) -> Result<(), SinkError>;
}

/// Deliver `file`, logging instead of failing.
///
/// Returns whether the export was delivered.
pub fn deliver_or_log<K: ExportSink + ?Sized>(sink: &mut K, file: &ExportedFile) -> bool {
    match sink.deliver(file) {
        Ok(()) => true,
        Err(error) => {
            error!(filename = %file.filename, %error, "failed to deliver export");
            false
        }
    }
}

/// Writes exports into a directory under their suggested names.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir`, created on first delivery.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path `file` is written to.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::InvalidFilename`] if the name is empty, contains a
    /// path separator, or is a relative path component.
    pub fn path_for(&self, file: &ExportedFile) -> Result<PathBuf, SinkError> {
        let name = file.filename.as_str();

        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(SinkError::InvalidFilename(name.to_string()));
        }

        Ok(self.dir.join(name))
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, file: &ExportedFile) -> Result<(), SinkError> {
        let path = self.path_for(file)?;

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, &file.bytes)?;

        info!(path = %path.display(), bytes = file.bytes.len(), "export written");

        Ok(())
    }
}

/// Keeps delivered exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<ExportedFile>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports delivered so far, oldest first.
    pub fn files(&self) -> &[ExportedFile] {
        &self.files
    }
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, file: &ExportedFile) -> Result<(), SinkError> {
        self.files.push(file.clone());

        Ok(())
    }
}
