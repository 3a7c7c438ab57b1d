//! Shared INI reading and writing
//!
//! Both `meta.ini` and registry catalogs use the same dialect: values are
//! taken verbatim (no quote or escape processing), option names are
//! case-insensitive and folded to lower case, and the `[DEFAULT]` section
//! is merged with any keys that precede the first section header.

use std::collections::BTreeMap;

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

use crate::error::{Result, malformed_meta};

/// Name of the default section
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Parse `text` read from `source`
pub fn parse(text: &str, source: &str) -> Result<Ini> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(text, options).map_err(|e| malformed_meta(source, e.to_string()))
}

/// Serialize `ini` without escaping values
pub fn render(ini: &Ini) -> Result<String> {
    let options = WriteOption {
        escape_policy: EscapePolicy::Nothing,
        ..WriteOption::default()
    };
    let mut buf = Vec::new();
    ini.write_to_opt(&mut buf, options)?;
    String::from_utf8(buf).map_err(|e| crate::error::BundleError::IoError {
        message: e.to_string(),
    })
}

/// Keys of the default section: sectionless keys plus `[DEFAULT]`
pub fn defaults(ini: &Ini) -> BTreeMap<String, String> {
    let mut defaults = BTreeMap::new();
    for (section, props) in ini.iter() {
        if section.is_none() || section == Some(DEFAULT_SECTION) {
            for (key, value) in props.iter() {
                defaults.insert(key.to_lowercase(), value.to_string());
            }
        }
    }
    defaults
}

/// Keys of one named section, lower-cased
pub fn section_items(props: &ini::Properties) -> BTreeMap<String, String> {
    props
        .iter()
        .map(|(key, value)| (key.to_lowercase(), value.to_string()))
        .collect()
}

/// Named sections other than `[DEFAULT]`, in file order
pub fn named_sections(ini: &Ini) -> impl Iterator<Item = (&str, &ini::Properties)> {
    ini.iter().filter_map(|(section, props)| match section {
        Some(name) if name != DEFAULT_SECTION => Some((name, props)),
        _ => None,
    })
}
