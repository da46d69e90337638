//! File enumeration over the source directory.
//!
//! One level deep, lexicographic by file name, so repeated runs on an
//! unchanged directory see the same files in the same order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::pipeline::PipelineError;

/// Extensions recognized as image sources. Matching is case-insensitive.
pub const IMAGE_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Upper-case name for user-facing messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
        }
    }
}

/// One candidate image discovered during enumeration. Transient; nothing
/// outlives the pipeline run.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub format: ImageFormat,
}

/// List the image files directly inside `source_directory`.
///
/// Fails with `DirectoryNotFound` before touching any file if the path is
/// missing or not a directory. Non-image entries and subdirectories are
/// skipped silently.
pub fn enumerate(source_directory: &Path) -> Result<Vec<ImageFile>, PipelineError> {
    if !source_directory.is_dir() {
        return Err(PipelineError::DirectoryNotFound(
            source_directory.to_path_buf(),
        ));
    }

    let mut files = vec![];
    for entry in WalkDir::new(source_directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(format) = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
        else {
            continue;
        };
        // Depth is capped at one, so the relative path is the file name.
        let relative_path = PathBuf::from(entry.file_name());
        files.push(ImageFile {
            path: entry.into_path(),
            relative_path,
            format,
        });
    }

    Ok(files)
}
