//! Scoped staging directory

use crate::error::ConversionError;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the staging directory inside the output directory
pub const STAGING_DIR_NAME: &str = "epub-staging";

/// A staging tree that is removed when dropped, unless persisted.
///
/// Creating one replaces whatever was at the path before.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    persist: bool,
}

impl StagingDir {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ConversionError> {
        let path = path.into();
        let staging_err = |source| ConversionError::Staging {
            path: path.clone(),
            source,
        };

        if path.exists() {
            tracing::debug!(path = %path.display(), "Removing previous staging directory");
            fs::remove_dir_all(&path).map_err(staging_err)?;
        }
        fs::create_dir_all(&path).map_err(staging_err)?;

        Ok(Self {
            path,
            persist: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the tree on disk and return its path
    pub fn persist(mut self) -> PathBuf {
        self.persist = true;
        self.path.clone()
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.persist {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove staging directory");
        }
    }
}
