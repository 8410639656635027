use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::frame_pipeline::common::error::Result;
use crate::frame_pipeline::encode::types::OutputFormat;

/// Output directory tree under `<base>/tmp/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn under<P: AsRef<Path>>(base_directory: P) -> Self {
        Self {
            root: base_directory.as_ref().join("tmp"),
        }
    }

    pub fn directory(&self, format: OutputFormat) -> PathBuf {
        self.root.join(format.directory_name())
    }

    pub fn path_for(&self, format: OutputFormat, index: u64) -> PathBuf {
        self.directory(format).join(format.file_name(index))
    }

    /// Recreates the three output directories, discarding anything from a previous run.
    pub fn prepare(&self) -> Result<()> {
        for format in OutputFormat::ALL {
            let dir = self.directory(format);
            if dir.exists() {
                debug!(dir = %dir.display(), "Clearing previous output");
                std::fs::remove_dir_all(&dir)?;
            }
            std::fs::create_dir_all(&dir)?;
        }
        info!(root = %self.root.display(), "Output directories ready");
        Ok(())
    }
}
