//! Error types and handling for bundlekit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Name and metadata reconciliation errors
//! - [`address`]: Address classification errors
//! - [`root`]: Root provider errors (missing paths, modes, archives, transports)
//! - [`meta`]: Metadata file errors
//! - [`registry`]: Registry catalog errors

pub mod address;
pub mod bundle;
pub mod meta;
pub mod registry;
pub mod root;

pub use address::{invalid as invalid_address, unsupported};
pub use bundle::{meta_conflict, missing_name, name_conflict};
pub use meta::malformed as malformed_meta;
pub use registry::invalid as registry_invalid;
pub use root::{archive_failed, invalid_mode, not_found, transport_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bundlekit operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundleError {
    // Reconciliation errors
    #[error("No package name was supplied and the bundle declares none")]
    #[diagnostic(
        code(bundlekit::bundle::missing_name),
        help("Pass a package name or add `pkg_name` to the bundle's meta.ini")
    )]
    MissingName,

    #[error("Declared package name \"{declared}\" differs from supplied package name \"{supplied}\"")]
    #[diagnostic(code(bundlekit::bundle::name_conflict))]
    NameConflict { declared: String, supplied: String },

    #[error("Declared meta value for {key} is \"{declared}\" and differs from supplied meta value \"{supplied}\"")]
    #[diagnostic(code(bundlekit::bundle::meta_conflict))]
    MetaConflict {
        key: String,
        declared: String,
        supplied: String,
    },

    // Address errors
    #[error("Unsupported bundle address: {address}: {reason}")]
    #[diagnostic(
        code(bundlekit::address::unsupported),
        help("Supported addresses: a directory, a .zip archive, or an http://, https:// or file:// URL")
    )]
    Unsupported { address: String, reason: String },

    #[error("Invalid bundle address: {address}")]
    #[diagnostic(
        code(bundlekit::address::invalid),
        help("The address must be a URL, a .zip archive, or an existing directory")
    )]
    InvalidAddress { address: String },

    // Root provider errors
    #[error("Invalid open mode: {mode}")]
    #[diagnostic(
        code(bundlekit::root::invalid_mode),
        help("Bundle roots are read-only; use a binary or text read mode")
    )]
    InvalidMode { mode: String },

    #[error("Not found in bundle: {path}")]
    #[diagnostic(code(bundlekit::root::not_found))]
    NotFound { path: String },

    #[error("Failed to read archive {path}: {reason}")]
    #[diagnostic(code(bundlekit::root::archive))]
    Archive { path: String, reason: String },

    #[error("Failed to fetch {url}: {reason}")]
    #[diagnostic(code(bundlekit::root::transport))]
    Transport { url: String, reason: String },

    // Metadata errors
    #[error("Malformed metadata file {path}: {reason}")]
    #[diagnostic(code(bundlekit::meta::malformed))]
    MalformedMeta { path: String, reason: String },

    // Registry errors
    #[error("Invalid registry: {message}")]
    #[diagnostic(code(bundlekit::registry::invalid))]
    RegistryInvalid { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bundlekit::config::invalid))]
    ConfigInvalid { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bundlekit::fs::io_error))]
    IoError { message: String },
}

impl BundleError {
    /// Whether this error is the backend's "no such path" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, BundleError::NotFound { .. })
    }
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return BundleError::NotFound {
                path: err.to_string(),
            };
        }
        BundleError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundleError>;
