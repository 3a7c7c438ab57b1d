//! Name and metadata reconciliation errors

use super::BundleError;

/// Creates a missing package name error
pub fn missing_name() -> BundleError {
    BundleError::MissingName
}

/// Creates a package name conflict error
pub fn name_conflict(declared: impl Into<String>, supplied: impl Into<String>) -> BundleError {
    BundleError::NameConflict {
        declared: declared.into(),
        supplied: supplied.into(),
    }
}

/// Creates a metadata value conflict error
pub fn meta_conflict(
    key: impl Into<String>,
    declared: impl Into<String>,
    supplied: impl Into<String>,
) -> BundleError {
    BundleError::MetaConflict {
        key: key.into(),
        declared: declared.into(),
        supplied: supplied.into(),
    }
}
