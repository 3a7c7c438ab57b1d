//! Local directory backend

use std::fs::File;
use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::error::{Result, invalid_address};

use super::{OpenMode, Stream, bundle_relative, finish, io_failure};

/// A bundle rooted at a directory on the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRoot {
    base_path: PathBuf,
}

impl PathRoot {
    /// Root a bundle at `base_path`, which must be an existing directory
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        if !base_path.is_dir() {
            return Err(invalid_address(base_path.display().to_string()));
        }
        Ok(Self { base_path })
    }

    /// The bundle root, exactly as given
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Host path of `sub_path` below the bundle root
    ///
    /// Fails with `NotFound` for a sub-path that would leave the root.
    pub fn resolve(&self, sub_path: &str) -> Result<PathBuf> {
        let relative = bundle_relative(sub_path)?;
        if MAIN_SEPARATOR == '/' {
            Ok(self.base_path.join(relative))
        } else {
            Ok(self
                .base_path
                .join(relative.replace('/', MAIN_SEPARATOR_STR)))
        }
    }

    pub fn open(&self, sub_path: &str, mode: OpenMode) -> Result<Stream> {
        let path = self.resolve(sub_path)?;
        let display = path.display().to_string();
        let file = File::open(&path).map_err(|e| io_failure(&display, e))?;
        finish(file, mode, &display)
    }
}
