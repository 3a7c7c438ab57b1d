//! Registry catalog errors

use super::BundleError;

/// Creates an invalid registry error
pub fn invalid(message: impl Into<String>) -> BundleError {
    BundleError::RegistryInvalid {
        message: message.into(),
    }
}
