//! bundlekit - uniform access to file bundles
//!
//! A bundle is a tree of files that lives in a plain directory, inside a
//! zip archive, or behind a URL, plus an optional `meta.ini` declaring its
//! package name and metadata. This crate opens files inside a bundle the
//! same way whatever the backend, and reconciles the identity a caller
//! expects with the one the bundle declares.
//!
//! ```no_run
//! use bundlekit::make_bundle;
//!
//! let bundle = make_bundle("dist/eg-pkg.zip", Some("example-package"), None)?;
//! let _readme = bundle.read_to_string("README")?;
//! # Ok::<(), bundlekit::BundleError>(())
//! ```

pub mod address;
pub mod bundle;
pub mod config;
pub mod error;
pub mod meta;
pub mod root;

#[cfg(test)]
mod test_fixtures;

pub use address::{Address, make_bundle, make_bundle_with};
pub use bundle::{Bundle, Identity, reconcile};
pub use config::{Entry, Registry, Settings};
pub use error::{BundleError, Result};
pub use meta::{Declared, Meta, read_declared};
pub use root::{OpenMode, PathRoot, RootProvider, Stream, UrlRoot, ZipRoot};
