//! Configuration and file format handling for bundlekit
//!
//! This module contains:
//! - [`Settings`] - runtime settings (metadata file name, HTTP user agent)
//! - `ini` - the INI dialect shared by `meta.ini` and registry catalogs
//! - `registry` - flat catalogs of named, versioned bundle entries

pub mod ini;
pub mod registry;
pub mod settings;

// Re-export commonly used types
pub use registry::{Entry, Registry};
pub use settings::Settings;
