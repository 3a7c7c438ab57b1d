//! Zip archive backend
//!
//! Many archiving tools wrap a whole package in one synthetic top-level
//! directory named after the archive. [`ZipRoot`] detects that directory
//! once, when the archive is opened, and prepends it to every lookup so
//! callers address files relative to the bundle either way.

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, archive_failed, not_found};

use super::{OpenMode, Stream, bundle_relative, finish, io_failure};

/// A bundle rooted inside a zip archive
///
/// The archive handle is not shareable between threads; open one
/// `ZipRoot` per thread instead.
pub struct ZipRoot {
    archive_path: PathBuf,
    archive: RefCell<ZipArchive<File>>,
    prefix: Option<String>,
}

impl fmt::Debug for ZipRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipRoot")
            .field("archive_path", &self.archive_path)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl ZipRoot {
    /// Open the archive at `archive_path` and detect its common prefix
    pub fn open_archive(archive_path: impl Into<PathBuf>) -> Result<Self> {
        let archive_path = archive_path.into();
        let location = archive_path.display().to_string();

        let file = File::open(&archive_path).map_err(|e| io_failure(&location, e))?;
        let archive = ZipArchive::new(file).map_err(|e| archive_failed(&location, e.to_string()))?;
        let prefix = common_prefix(archive.file_names());

        tracing::debug!(
            archive = %location,
            entries = archive.len(),
            prefix = prefix.as_deref().unwrap_or(""),
            "Opened zip root"
        );

        Ok(Self {
            archive_path,
            archive: RefCell::new(archive),
            prefix,
        })
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// The detected wrapping directory, including its trailing `/`
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Archive entry name for a bundle-relative sub-path
    pub fn entry_name(&self, sub_path: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{sub_path}"),
            None => sub_path.to_string(),
        }
    }

    pub fn open(&self, sub_path: &str, mode: OpenMode) -> Result<Stream> {
        let name = self.entry_name(bundle_relative(sub_path)?);
        let location = self.archive_path.display().to_string();

        // The entry borrows the archive; copy it out so the borrow ends here.
        let bytes = {
            let mut archive = self.archive.borrow_mut();
            let mut entry = match archive.by_name(&name) {
                Ok(entry) => entry,
                Err(ZipError::FileNotFound) => return Err(not_found(name)),
                Err(e) => return Err(archive_failed(&location, e.to_string())),
            };
            let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| archive_failed(&location, format!("{name}: {e}")))?;
            bytes
        };

        finish(Cursor::new(bytes), mode, &name)
    }
}

/// Detect the directory every entry name is rooted under
///
/// The first name supplies the candidate: everything up to and including
/// its first `/`. The candidate is returned only if every name starts with
/// it. An empty list, a first name without a separator, or any name outside
/// the candidate yields `None`.
pub fn common_prefix<'a, I>(names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names = names.into_iter();
    let first = names.next()?;
    let split = first.find('/')?;
    let candidate = &first[..=split];

    if names.all(|name| name.starts_with(candidate)) {
        Some(candidate.to_string())
    } else {
        None
    }
}
