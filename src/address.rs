//! Bundle address dispatch
//!
//! An address is one of:
//! - a URL: `http://host/pkg`, `https://host/pkg`, `file:///srv/pkg`, `ftp://host/pkg`
//! - a zip archive: `./dist/pkg.zip`
//! - a local directory: `./pkg`, `/abs/pkg`
//!
//! Tarballs (`.tar`, `.tgz`, `.gz`, `.bz2`) are recognized and rejected.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::bundle::Bundle;
use crate::config::Settings;
use crate::error::{Result, invalid_address, unsupported};
use crate::meta::Meta;
use crate::root::RootProvider;

#[allow(clippy::unwrap_used)]
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(http|https|file|ftp)://(.*)$").unwrap());

/// Archive extensions that are recognized but not supported
const UNSUPPORTED_EXTENSIONS: &[&str] = &["tar", "tgz", "gz", "bz2"];

/// A classified bundle address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Base URL
    Url(String),
    /// Zip archive on the local filesystem
    Zip(PathBuf),
    /// Existing local directory
    Dir(PathBuf),
}

impl Address {
    /// Classify an address string
    ///
    /// URLs win over everything else; then unsupported archive extensions
    /// fail; then `.zip` paths; anything left must be an existing directory.
    /// Extensions are compared case-insensitively.
    pub fn parse(address: &str) -> Result<Self> {
        if URL_REGEX.is_match(address) {
            return Ok(Address::Url(address.to_string()));
        }

        let path = Path::new(address);
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        if let Some(ext) = ext.as_deref() {
            if UNSUPPORTED_EXTENSIONS.contains(&ext) {
                return Err(unsupported(
                    address,
                    format!(".{ext} archives are not supported"),
                ));
            }
            if ext == "zip" {
                return Ok(Address::Zip(path.to_path_buf()));
            }
        }

        if path.is_dir() {
            return Ok(Address::Dir(path.to_path_buf()));
        }

        Err(invalid_address(address))
    }

    /// Construct the root provider for this address
    pub fn into_root(self, settings: &Settings) -> Result<RootProvider> {
        match self {
            Address::Url(url) => RootProvider::url(url, settings),
            Address::Zip(path) => RootProvider::zip(path),
            Address::Dir(path) => RootProvider::path(path),
        }
    }
}

/// Build a bundle from an address with default settings
///
/// `name` and `meta` are the caller's expectations; they are reconciled
/// with whatever the bundle declares about itself.
pub fn make_bundle(address: &str, name: Option<&str>, meta: Option<Meta>) -> Result<Bundle> {
    make_bundle_with(address, name, meta, &Settings::default())
}

/// Build a bundle from an address with explicit settings
pub fn make_bundle_with(
    address: &str,
    name: Option<&str>,
    meta: Option<Meta>,
    settings: &Settings,
) -> Result<Bundle> {
    let parsed = Address::parse(address)?;
    tracing::debug!(address, kind = ?parsed, "Classified bundle address");

    let root = parsed.into_root(settings)?;
    Bundle::from_root(root, name, meta, settings)
}
