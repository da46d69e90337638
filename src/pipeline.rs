//! Pipeline orchestration - single entry point for both operations.
//!
//! Each operation runs Resolving -> Scanning -> Processing -> Reporting.
//! Per-file structural problems are aggregated, never short-circuited, so
//! one run surfaces every problem; directory and write errors abort
//! immediately.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::SourceConfig;
use crate::enumerate::{enumerate, ImageFile};
use crate::manifest::{Manifest, MANIFEST_FILE_NAME};
use crate::validation::{ValidationResult, Validator};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Source directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read directory entry: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },

    #[error("Duplicate asset key `{0}`: two source files share the same name without extension")]
    DuplicateAssetKey(String),

    #[error("Manifest serialization failed: {0}")]
    ManifestSerialize(#[from] serde_json::Error),

    #[error("Manifest file could not be written: {0}")]
    ManifestWrite(io::Error),
}

/// Aggregated outcome of a `verify` run, in enumeration order.
#[derive(Debug)]
pub struct VerifyReport {
    pub results: Vec<ValidationResult>,
}

impl VerifyReport {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(ValidationResult::is_valid)
    }

    /// Results carrying at least one violation, grouped per file.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|result| !result.is_valid())
    }
}

/// The pipeline - resolves the source directory once and drives the
/// enumerate/validate/build steps for each operation.
pub struct Pipeline {
    config: SourceConfig,
    validator: Validator,
}

impl Pipeline {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            validator: Validator::new(),
        }
    }

    /// Validate every image in the source directory.
    ///
    /// An individual file's violations never stop the run; the report holds
    /// one result per file. Only directory resolution and unreadable files
    /// abort.
    pub fn verify(&self) -> Result<VerifyReport, PipelineError> {
        let files = self.scan()?;
        let mut results = Vec::with_capacity(files.len());
        for file in &files {
            results.push(self.validator.validate(file)?);
        }
        debug!(
            files = results.len(),
            failures = results.iter().filter(|r| !r.is_valid()).count(),
            "verification complete"
        );
        Ok(VerifyReport { results })
    }

    /// Build the manifest and write it to `imageset.json` in the working
    /// directory, replacing any existing file.
    pub fn build_manifest(&self) -> Result<Manifest, PipelineError> {
        let files = self.scan()?;
        let manifest = Manifest::build(&files)?;
        manifest.write_to(Path::new(MANIFEST_FILE_NAME))?;
        debug!(assets = manifest.len(), "manifest written");
        Ok(manifest)
    }

    fn scan(&self) -> Result<Vec<ImageFile>, PipelineError> {
        let files = enumerate(&self.config.source_directory)?;
        debug!(
            directory = %self.config.source_directory.display(),
            count = files.len(),
            "enumerated image files"
        );
        Ok(files)
    }
}
