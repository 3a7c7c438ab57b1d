//! Bundle metadata files
//!
//! A bundle may carry a `meta.ini` at its root. Its default section holds
//! the reserved `pkg_name` key plus any number of free-form string keys:
//!
//! ```ini
//! [DEFAULT]
//! pkg_name = example-package
//! unusual_key = nonsense data
//! ```

use std::collections::BTreeMap;
use std::io::Read;

use ini::Ini;

use crate::config::Settings;
use crate::config::ini::{self as ini_format, DEFAULT_SECTION};
use crate::error::{Result, malformed_meta};
use crate::root::{OpenMode, RootProvider, normalize_newlines};

/// Reserved key naming the package
pub const NAME_KEY: &str = "pkg_name";

/// Free-form bundle metadata
pub type Meta = BTreeMap<String, String>;

/// What a bundle says about itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declared {
    /// Declared package name, if any
    pub name: Option<String>,
    /// Declared metadata, without the name key
    pub meta: Meta,
}

impl Declared {
    /// Parse a metadata document read from `source`
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let ini = ini_format::parse(text, source)?;
        let mut meta = ini_format::defaults(&ini);
        let name = meta.remove(NAME_KEY);
        Ok(Self { name, meta })
    }

    /// Render back into a metadata document
    ///
    /// Keys are written in sorted order after the name. Parsing the result
    /// yields an equal `Declared` for lower-case keys.
    pub fn to_ini_string(&self) -> Result<String> {
        let mut ini = Ini::new();
        if let Some(name) = &self.name {
            ini.set_to(Some(DEFAULT_SECTION), NAME_KEY.to_string(), name.clone());
        }
        for (key, value) in &self.meta {
            ini.set_to(Some(DEFAULT_SECTION), key.clone(), value.clone());
        }
        ini_format::render(&ini)
    }
}

/// Read the metadata a bundle declares about itself
///
/// A missing metadata file is not an error: the bundle simply declares
/// nothing. Any other failure, including a malformed file, is.
pub fn read_declared(root: &RootProvider, settings: &Settings) -> Result<Declared> {
    let source = format!("{}/{}", root.location(), settings.meta_file);

    // Invalid UTF-8 is a malformed file, not an I/O failure.
    let bytes = match root.open(&settings.meta_file, Some(OpenMode::Binary)) {
        Ok(mut stream) => {
            let mut bytes = Vec::new();
            stream.read_to_end(&mut bytes)?;
            bytes
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(root = %root.location(), file = %settings.meta_file, "No metadata file");
            return Ok(Declared::default());
        }
        Err(e) => return Err(e),
    };

    let text = String::from_utf8(bytes).map_err(|e| malformed_meta(&source, e.to_string()))?;
    let declared = Declared::parse(&normalize_newlines(&text), &source)?;
    tracing::debug!(
        root = %root.location(),
        name = declared.name.as_deref().unwrap_or(""),
        keys = declared.meta.len(),
        "Read bundle metadata"
    );
    Ok(declared)
}
