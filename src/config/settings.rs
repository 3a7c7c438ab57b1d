//! Runtime settings for opening bundles
//!
//! Defaults are compiled in; `Settings::from_env` lets a host process
//! override them through `BUNDLEKIT_*` environment variables.

use std::path::{Component, Path};

use crate::error::{BundleError, Result};

/// Default name of the metadata file at the bundle root
pub const DEFAULT_META_FILE: &str = "meta.ini";

/// Environment variable overriding the metadata file name
pub const META_FILE_ENV: &str = "BUNDLEKIT_META_FILE";

/// Environment variable overriding the HTTP user agent
pub const USER_AGENT_ENV: &str = "BUNDLEKIT_USER_AGENT";

/// Settings shared by root providers and the metadata reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Metadata file name, relative to the bundle root
    pub meta_file: String,

    /// User agent sent by URL roots
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meta_file: DEFAULT_META_FILE.to_string(),
            user_agent: format!("bundlekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Build settings from the defaults plus any `BUNDLEKIT_*` overrides
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();

        if let Ok(meta_file) = std::env::var(META_FILE_ENV) {
            settings = settings.with_meta_file(meta_file)?;
        }
        if let Ok(user_agent) = std::env::var(USER_AGENT_ENV) {
            if !user_agent.trim().is_empty() {
                settings.user_agent = user_agent;
            }
        }

        Ok(settings)
    }

    /// Use a different metadata file name
    ///
    /// The name must stay inside the bundle root: empty, absolute and
    /// `..`-containing names are rejected.
    pub fn with_meta_file(mut self, meta_file: impl Into<String>) -> Result<Self> {
        let meta_file = meta_file.into();
        validate_sub_path(&meta_file)?;
        self.meta_file = meta_file;
        Ok(self)
    }
}

fn validate_sub_path(sub_path: &str) -> Result<()> {
    let path = Path::new(sub_path);
    let escapes = path.is_absolute()
        || sub_path.starts_with('/')
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));

    if sub_path.trim().is_empty() || escapes {
        return Err(BundleError::ConfigInvalid {
            message: format!("metadata file must be a relative path inside the bundle: '{sub_path}'"),
        });
    }
    Ok(())
}
