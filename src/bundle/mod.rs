//! Bundle model
//!
//! A [`Bundle`] is a named unit of content with metadata, backed by exactly
//! one [`RootProvider`]. Its name and metadata are reconciled once, when it
//! is built, and never change afterwards.
//!
//! ## Module Organization
//!
//! - `mod.rs`: Bundle and Identity
//! - `reconcile.rs`: merging supplied and declared identity

pub mod reconcile;

pub use reconcile::reconcile;

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::Result;
use crate::meta::{Meta, read_declared};
use crate::root::{OpenMode, RootProvider, Stream};

/// The reconciled name and metadata of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Package name
    pub name: String,

    /// Metadata, declared and supplied
    #[serde(default)]
    pub meta: Meta,
}

/// A fully reconciled bundle
#[derive(Debug)]
pub struct Bundle {
    identity: Identity,
    root: RootProvider,
}

impl Bundle {
    /// Build a bundle from an already constructed root
    ///
    /// Reads the bundle's metadata file (if any) and reconciles it with the
    /// supplied name and metadata. Either everything agrees and a bundle is
    /// returned, or nothing is.
    pub fn from_root(
        root: RootProvider,
        name: Option<&str>,
        meta: Option<Meta>,
        settings: &Settings,
    ) -> Result<Self> {
        let declared = read_declared(&root, settings)?;
        let identity = reconcile(name, meta, declared)?;

        tracing::debug!(
            name = %identity.name,
            root = %root.location(),
            kind = root.kind(),
            "Bundle reconciled"
        );

        Ok(Self { identity, root })
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn meta(&self) -> &Meta {
        &self.identity.meta
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn root(&self) -> &RootProvider {
        &self.root
    }

    /// Open `sub_path` inside the bundle
    pub fn open(&self, sub_path: &str, mode: Option<OpenMode>) -> Result<Stream> {
        self.root.open(sub_path, mode)
    }

    /// Read `sub_path` as text
    pub fn read_to_string(&self, sub_path: &str) -> Result<String> {
        let mut text = String::new();
        self.open(sub_path, Some(OpenMode::Text))?
            .read_to_string(&mut text)?;
        Ok(text)
    }

    /// Read `sub_path` as raw bytes
    pub fn read_bytes(&self, sub_path: &str) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open(sub_path, Some(OpenMode::Binary))?
            .read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Split into identity and root
    pub fn into_parts(self) -> (Identity, RootProvider) {
        (self.identity, self.root)
    }
}
