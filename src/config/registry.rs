//! Registry catalogs
//!
//! A registry lists bundles by name, version and revision in one INI file.
//! The section title carries the identity, the section body the metadata:
//!
//! ```ini
//! [DEFAULT]
//! registry_name = local
//!
//! [example-package, 1.0, 2]
//! unusual_key = nonsense data
//! ```
//!
//! Keys in `[DEFAULT]` other than `registry_name` are inherited by every entry.

use std::path::{Path, PathBuf};

use ini::{Ini, Properties};
use serde::{Deserialize, Serialize};

use crate::config::ini::{self as ini_format, DEFAULT_SECTION};
use crate::error::{Result, registry_invalid};
use crate::meta::Meta;

/// Default-section key holding the registry's own name
pub const REGISTRY_NAME_KEY: &str = "registry_name";

const VERSION_KEY: &str = "version";
const REVISION_KEY: &str = "revision";

/// One bundle listed in a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub version: String,
    pub revision: String,
    #[serde(default)]
    pub meta: Meta,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        revision: impl Into<String>,
        meta: Meta,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            revision: revision.into(),
            meta,
        }
    }

    /// Build an entry from flat metadata, taking `version` and `revision` out of it
    pub fn from_meta(name: impl Into<String>, mut meta: Meta) -> Self {
        let version = meta.remove(VERSION_KEY).unwrap_or_default();
        let revision = meta.remove(REVISION_KEY).unwrap_or_default();
        Self::new(name, version, revision, meta)
    }

    fn section_title(&self) -> String {
        format!("{},{},{}", self.name, self.version, self.revision)
    }
}

/// A named catalog of entries, optionally tied to the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    pub name: String,
    pub entries: Vec<Entry>,
    pub ini_file: Option<PathBuf>,
}

impl Registry {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
            ini_file: None,
        }
    }

    /// Parse a registry from INI text
    pub fn from_ini_str(text: &str, source: &str) -> Result<Self> {
        let ini = ini_format::parse(text, source)?;
        let defaults = ini_format::defaults(&ini);

        let name = defaults
            .get(REGISTRY_NAME_KEY)
            .cloned()
            .ok_or_else(|| registry_invalid(format!("{source}: missing {REGISTRY_NAME_KEY}")))?;

        let mut entries = Vec::new();
        for (title, props) in ini_format::named_sections(&ini) {
            let parts: Vec<&str> = title.split(',').map(str::trim).collect();
            let [entry_name, version, revision] = parts.as_slice() else {
                return Err(registry_invalid(format!(
                    "{source}: section '{title}' must be 'name, version, revision'"
                )));
            };

            let items = ini_format::section_items(props);
            if items.contains_key(VERSION_KEY) || items.contains_key(REVISION_KEY) {
                return Err(registry_invalid(format!(
                    "{source}: version and revision go in the section title ('{title}')"
                )));
            }

            let mut meta: Meta = defaults
                .iter()
                .filter(|(key, _)| key.as_str() != REGISTRY_NAME_KEY)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            meta.extend(items);

            entries.push(Entry::new(*entry_name, *version, *revision, meta));
        }

        tracing::debug!(registry = %name, entries = entries.len(), "Loaded registry");
        Ok(Self::new(name, entries))
    }

    /// Load a registry from an INI file, remembering the path for writing back
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                crate::error::not_found(&display)
            } else {
                e.into()
            }
        })?;

        let mut registry = Self::from_ini_str(&text, &display)?;
        registry.ini_file = Some(path.to_path_buf());
        Ok(registry)
    }

    /// Serialize to INI text
    pub fn to_ini_string(&self) -> Result<String> {
        let mut ini = Ini::new();
        ini.set_to(
            Some(DEFAULT_SECTION),
            REGISTRY_NAME_KEY.to_string(),
            self.name.clone(),
        );
        for entry in &self.entries {
            let title = entry.section_title();
            // An entry without metadata still needs its section header.
            ini.entry(Some(title.clone())).or_insert(Properties::new());
            for (key, value) in &entry.meta {
                ini.set_to(Some(title.as_str()), key.clone(), value.clone());
            }
        }
        ini_format::render(&ini)
    }

    /// Write to `path`, or to the file the registry was loaded from
    pub fn to_ini_file(&self, path: Option<&Path>) -> Result<()> {
        let target = path
            .or(self.ini_file.as_deref())
            .ok_or_else(|| registry_invalid("no ini file to write to"))?;
        std::fs::write(target, self.to_ini_string()?)?;
        Ok(())
    }

    /// Find the first entry named `name`
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}
