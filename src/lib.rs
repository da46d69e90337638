//! Image set tools - inventory and publication gate for image assets.
//!
//! Scans a source directory of raster and vector assets, validates them
//! against per-format structural rules (SVG roots must stay scalable, raster
//! bytes must match their extension), and builds the `imageset.json`
//! manifest describing the set.

pub mod config;
pub mod enumerate;
pub mod manifest;
pub mod pipeline;
pub mod validation;

pub use config::{SourceConfig, DEFAULT_SOURCE_DIRECTORY, SOURCE_DIRECTORY_ENV};
pub use enumerate::{enumerate, ImageFile, ImageFormat, IMAGE_EXTENSIONS};
pub use manifest::{AssetDescriptor, Manifest, MANIFEST_FILE_NAME};
pub use pipeline::{Pipeline, PipelineError, VerifyReport};
pub use validation::{FormatRule, ValidationResult, Validator, Violation};
