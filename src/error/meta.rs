//! Metadata file errors

use super::BundleError;

/// Creates a malformed metadata error
pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::MalformedMeta {
        path: path.into(),
        reason: reason.into(),
    }
}
