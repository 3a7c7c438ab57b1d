//! Root provider errors

use super::BundleError;

/// Creates a not found error for a path inside a bundle root
pub fn not_found(path: impl Into<String>) -> BundleError {
    BundleError::NotFound { path: path.into() }
}

/// Creates an invalid open mode error
pub fn invalid_mode(mode: impl Into<String>) -> BundleError {
    BundleError::InvalidMode { mode: mode.into() }
}

/// Creates an archive read error
pub fn archive_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::Archive {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a transport error for a remote root
pub fn transport_failed(url: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::Transport {
        url: url.into(),
        reason: reason.into(),
    }
}
