//! Bundle root providers
//!
//! A root provider opens a named sub-path inside a bundle as a readable
//! stream. Three backends exist:
//! - [`PathRoot`]: a plain directory on the local filesystem
//! - [`ZipRoot`]: a zip archive, with its wrapping directory detected and stripped
//! - [`UrlRoot`]: an `http://`, `https://` or `file://` base URL
//!
//! Sub-paths always use `/` as separator, whatever the backend or host, and
//! are always relative to the bundle root: a leading `/` is dropped, and a
//! path that would climb out of the root is never found.
//!
//! ## Module Organization
//!
//! - `dir.rs`: local directory backend
//! - `archive.rs`: zip backend and common prefix detection
//! - `remote.rs`: URL backend

pub mod archive;
pub mod dir;
pub mod remote;

pub use archive::{ZipRoot, common_prefix};
pub use dir::PathRoot;
pub use remote::UrlRoot;

use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::config::Settings;
use crate::error::{BundleError, Result, invalid_mode, not_found};

/// An open, owned stream over one file of a bundle
///
/// Dropping the stream releases whatever handle backs it.
pub type Stream = Box<dyn Read + Send>;

/// How a sub-path should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Raw bytes, untouched
    #[default]
    Binary,
    /// UTF-8 text with `\r\n` and `\r` line endings folded to `\n`
    Text,
}

impl FromStr for OpenMode {
    type Err = BundleError;

    /// Parse a conventional mode string such as `"rb"` or `"rU"`
    ///
    /// Every root is read-only, so write, append, update and exclusive
    /// create modes are rejected.
    fn from_str(mode: &str) -> Result<Self> {
        if mode.chars().any(|c| matches!(c, 'w' | 'a' | '+' | 'x')) {
            return Err(invalid_mode(mode));
        }
        match mode {
            "rb" | "br" => Ok(OpenMode::Binary),
            "r" | "rt" | "tr" | "rU" | "U" => Ok(OpenMode::Text),
            _ => Err(invalid_mode(mode)),
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenMode::Binary => write!(f, "rb"),
            OpenMode::Text => write!(f, "rt"),
        }
    }
}

/// A bundle root: the one capability every backend shares is `open`
#[derive(Debug)]
pub enum RootProvider {
    /// Local directory
    Path(PathRoot),
    /// Zip archive
    Zip(ZipRoot),
    /// Base URL
    Url(UrlRoot),
}

impl RootProvider {
    /// Root a bundle at an existing local directory
    pub fn path(base_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(RootProvider::Path(PathRoot::new(base_path)?))
    }

    /// Root a bundle inside the zip archive at `archive_path`
    pub fn zip(archive_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(RootProvider::Zip(ZipRoot::open_archive(archive_path)?))
    }

    /// Root a bundle at a base URL
    pub fn url(base_url: impl Into<String>, settings: &Settings) -> Result<Self> {
        Ok(RootProvider::Url(UrlRoot::new(base_url, settings)?))
    }

    /// Open `sub_path` relative to the bundle root
    ///
    /// `mode` defaults to [`OpenMode::Binary`]. A path the backend cannot
    /// locate fails with [`BundleError::NotFound`].
    pub fn open(&self, sub_path: &str, mode: Option<OpenMode>) -> Result<Stream> {
        let mode = mode.unwrap_or_default();
        match self {
            RootProvider::Path(root) => root.open(sub_path, mode),
            RootProvider::Zip(root) => root.open(sub_path, mode),
            RootProvider::Url(root) => root.open(sub_path, mode),
        }
    }

    /// Human readable location of the root, for logs and messages
    pub fn location(&self) -> String {
        match self {
            RootProvider::Path(root) => dunce::simplified(root.base_path()).display().to_string(),
            RootProvider::Zip(root) => dunce::simplified(root.archive_path()).display().to_string(),
            RootProvider::Url(root) => root.base_url().to_string(),
        }
    }

    /// Short backend name
    pub fn kind(&self) -> &'static str {
        match self {
            RootProvider::Path(_) => "path",
            RootProvider::Zip(_) => "zip",
            RootProvider::Url(_) => "url",
        }
    }
}

/// Wrap a backend reader according to the requested mode
fn finish<R>(reader: R, mode: OpenMode, path: &str) -> Result<Stream>
where
    R: Read + Send + 'static,
{
    match mode {
        OpenMode::Binary => Ok(Box::new(reader)),
        OpenMode::Text => {
            let mut reader = reader;
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .map_err(|e| io_failure(path, e))?;
            Ok(Box::new(Cursor::new(normalize_newlines(&text).into_bytes())))
        }
    }
}

/// Strip a leading `/` from `sub_path` and refuse anything that leaves the root
fn bundle_relative(sub_path: &str) -> Result<&str> {
    let relative = sub_path.trim_start_matches('/');
    let escapes = Path::new(relative).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(not_found(sub_path));
    }
    Ok(relative)
}

/// Fold `\r\n` and lone `\r` line endings to `\n`
pub(crate) fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Map an I/O failure at `path`, keeping "not found" distinguishable
fn io_failure(path: &str, err: std::io::Error) -> BundleError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return not_found(path);
    }
    BundleError::IoError {
        message: format!("{path}: {err}"),
    }
}
