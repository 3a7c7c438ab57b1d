//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helper functions to create common test bundles
//! (temp directories, loose files, zip archives) with a single function call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, write_files, zip_dir};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     write_files(temp.path(), &[("pkg/meta.ini", "[DEFAULT]\npkg_name = p\n")]);
//!     zip_dir(&temp.path().join("pkg"), &temp.path().join("pkg.zip"), Some("pkg"));
//! }
//! ```

#![allow(clippy::expect_used)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Create a temp directory in the system temp location.
///
/// Uses `crate::temp::temp_dir_base()` to ensure temp dirs are never
/// created under the current working directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Create files below `base`.
///
/// Takes a list of (path, content) tuples; parent directories are created
/// as needed.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn write_files(base: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = base.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Write a zip archive holding exactly the given (entry name, content) pairs,
/// in order.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_zip(archive: &Path, entries: &[(&str, &str)]) {
    let file = File::create(archive).expect("Failed to create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        writer
            .start_file(*name, options)
            .expect("Failed to start archive entry");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write archive entry");
    }
    writer.finish().expect("Failed to finish archive");
}

/// Zip the directory `src` into `archive`.
///
/// With `wrap`, every entry is placed below a `wrap/` directory, the way
/// most archiving tools package a folder.
///
/// # Panics
///
/// Panics if the directory cannot be walked or the archive written.
pub fn zip_dir(src: &Path, archive: &Path, wrap: Option<&str>) {
    let file = File::create(archive).expect("Failed to create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    if let Some(wrap) = wrap {
        writer
            .add_directory(format!("{wrap}/"), options)
            .expect("Failed to add wrapping directory");
    }

    let mut files: Vec<_> = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .collect();
    files.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in files {
        let relative = entry
            .path()
            .strip_prefix(src)
            .expect("Walked path outside source directory");
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let name = match wrap {
            Some(wrap) => format!("{wrap}/{relative}"),
            None => relative,
        };

        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{name}/"), options)
                .expect("Failed to add archive directory");
        } else {
            let content = std::fs::read(entry.path()).expect("Failed to read source file");
            writer
                .start_file(name, options)
                .expect("Failed to start archive entry");
            writer
                .write_all(&content)
                .expect("Failed to write archive entry");
        }
    }
    writer.finish().expect("Failed to finish archive");
}

/// `file://` URL for a local directory.
///
/// # Panics
///
/// Panics if `path` is not absolute.
#[must_use]
pub fn file_url(path: &Path) -> String {
    url::Url::from_directory_path(path)
        .expect("Directory path must be absolute")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::common_prefix;
    use zip::ZipArchive;

    fn entry_names(archive: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(archive).unwrap()).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_write_files_creates_parents() {
        let temp = create_temp_dir();
        write_files(temp.path(), &[("a/b/c.txt", "x")]);
        assert_eq!(std::fs::read_to_string(temp.path().join("a/b/c.txt")).unwrap(), "x");
    }

    #[test]
    fn test_zip_dir_wrapped_has_prefix() {
        let temp = create_temp_dir();
        let src = temp.path().join("pkg");
        write_files(&src, &[("README", "r"), ("docs/intro.txt", "i")]);
        let archive = temp.path().join("pkg.zip");

        zip_dir(&src, &archive, Some("pkg"));
        let names = entry_names(&archive);
        assert_eq!(names[0], "pkg/");
        assert_eq!(common_prefix(names.iter().map(String::as_str)), Some("pkg/".to_string()));
    }

    #[test]
    fn test_zip_dir_flat_has_no_prefix() {
        let temp = create_temp_dir();
        let src = temp.path().join("pkg");
        write_files(&src, &[("README", "r"), ("docs/intro.txt", "i")]);
        let archive = temp.path().join("flat.zip");

        zip_dir(&src, &archive, None);
        let names = entry_names(&archive);
        assert_eq!(common_prefix(names.iter().map(String::as_str)), None);
    }
}
