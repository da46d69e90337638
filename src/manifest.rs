//! Manifest building and serialization.
//!
//! The manifest is a flat JSON object mapping asset keys (relative path,
//! extension stripped) to descriptors. `BTreeMap` keeps key order stable so
//! two runs over an unchanged directory produce byte-identical output.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::enumerate::{ImageFile, ImageFormat};
use crate::pipeline::PipelineError;

/// File name the manifest is written to, in the working directory.
pub const MANIFEST_FILE_NAME: &str = "imageset.json";

#[derive(Debug, Clone, Serialize)]
pub struct AssetDescriptor {
    pub path: String,
    pub format: ImageFormat,
}

/// The JSON inventory document describing the image set.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    assets: BTreeMap<String, AssetDescriptor>,
}

impl Manifest {
    /// Build the key -> descriptor mapping from the enumerated files.
    ///
    /// Two files colliding on one key (e.g. `icon.svg` and `icon.png`) is a
    /// content error and fails with `DuplicateAssetKey` rather than letting
    /// insertion order pick a winner.
    pub fn build(files: &[ImageFile]) -> Result<Self, PipelineError> {
        let mut assets = BTreeMap::new();
        for file in files {
            let key = asset_key(&file.relative_path);
            let descriptor = AssetDescriptor {
                path: file.relative_path.to_string_lossy().into_owned(),
                format: file.format,
            };
            if assets.insert(key.clone(), descriptor).is_some() {
                return Err(PipelineError::DuplicateAssetKey(key));
            }
        }
        Ok(Self { assets })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Serialize as pretty JSON and write to `path`, replacing any existing
    /// file.
    pub fn write_to(&self, path: &Path) -> Result<(), PipelineError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json).map_err(PipelineError::ManifestWrite)
    }
}

/// The manifest's lookup identifier for one image: relative path without
/// extension.
fn asset_key(relative_path: &Path) -> String {
    relative_path.with_extension("").to_string_lossy().into_owned()
}
