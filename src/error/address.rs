//! Address classification errors

use super::BundleError;

/// Creates an unsupported address error
pub fn unsupported(address: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::Unsupported {
        address: address.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid address error
pub fn invalid(address: impl Into<String>) -> BundleError {
    BundleError::InvalidAddress {
        address: address.into(),
    }
}
