use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Minimal 1x1 transparent PNG, valid under a signature check.
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Working directory with a populated source subdirectory.
pub struct ImageSet {
    tmp: TempDir,
}

impl ImageSet {
    /// Create a temp working directory and fill `<dir>/<source>` with the
    /// given files.
    pub fn new(source: &str, files: &[(&str, &[u8])]) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let source_dir = tmp.path().join(source);
        fs::create_dir_all(&source_dir).expect("create source directory");
        for (name, bytes) in files {
            fs::write(source_dir.join(name), bytes).expect("write fixture file");
        }
        Self { tmp }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// An `oist` invocation rooted in this working directory, with the
    /// source-directory environment variable cleared.
    pub fn oist(&self) -> Command {
        let mut cmd = Command::cargo_bin("oist").expect("binary builds");
        cmd.current_dir(self.tmp.path())
            .env_remove("IMAGESET_SOURCE_DIRECTORY");
        cmd
    }
}
