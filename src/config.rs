//! Source directory resolution.
//!
//! Precedence: explicit flag, then `IMAGESET_SOURCE_DIRECTORY`, then `src`.
//! Resolved once at startup into a plain struct.

use std::env;
use std::path::PathBuf;

/// Environment variable consulted when `--source-directory` is omitted.
pub const SOURCE_DIRECTORY_ENV: &str = "IMAGESET_SOURCE_DIRECTORY";

/// Fallback directory, relative to the working directory.
pub const DEFAULT_SOURCE_DIRECTORY: &str = "src";

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub source_directory: PathBuf,
}

impl SourceConfig {
    /// Resolve the source directory from the CLI flag and the process
    /// environment.
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        let env_value = env::var_os(SOURCE_DIRECTORY_ENV).map(PathBuf::from);
        let config = Self::from_layers(flag, env_value);
        tracing::debug!(
            directory = %config.source_directory.display(),
            "resolved source directory"
        );
        config
    }

    /// Pure layering over (flag, environment value). An empty environment
    /// value counts as unset.
    fn from_layers(flag: Option<PathBuf>, env_value: Option<PathBuf>) -> Self {
        let source_directory = flag
            .or_else(|| env_value.filter(|v| !v.as_os_str().is_empty()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIRECTORY));
        Self { source_directory }
    }
}
