//! Common test utilities for bundlekit integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Path to a fixture file or directory below `tests/common/fixtures`
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("common")
        .join("fixtures")
        .join(relative)
}

/// A scratch workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        init_tracing();
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Create an empty bundle directory in workspace
    pub fn create_bundle(&self, name: &str) -> PathBuf {
        let bundle_path = self.path.join("bundles").join(name);
        std::fs::create_dir_all(&bundle_path).expect("Failed to create bundle directory");
        bundle_path
    }

    /// Copy fixture bundle to workspace
    pub fn copy_fixture_bundle(&self, fixture_name: &str) -> PathBuf {
        let fixture = fixture_path(&format!("bundles/{fixture_name}"));
        let target_path = self.create_bundle(fixture_name);
        copy_dir_recursive(&fixture, &target_path).expect("Failed to copy fixture bundle");
        target_path
    }

    /// Zip a bundle directory of this workspace next to it
    ///
    /// With `wrapped`, entries sit below a directory named after the bundle.
    pub fn zip_bundle(&self, name: &str, wrapped: bool) -> PathBuf {
        let src = self.path.join("bundles").join(name);
        let suffix = if wrapped { "" } else { "-flat" };
        let archive = self.path.join("bundles").join(format!("{name}{suffix}.zip"));
        zip_dir(&src, &archive, wrapped.then_some(name));
        archive
    }

    /// `file://` URL of a bundle directory of this workspace
    pub fn bundle_url(&self, name: &str) -> String {
        let dir = self.path.join("bundles").join(name);
        url::Url::from_directory_path(&dir)
            .expect("Workspace paths are absolute")
            .to_string()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Zip `src` into `archive`, optionally below a `wrap/` directory
pub fn zip_dir(src: &Path, archive: &Path, wrap: Option<&str>) {
    let file = File::create(archive).expect("Failed to create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    if let Some(wrap) = wrap {
        writer
            .add_directory(format!("{wrap}/"), options)
            .expect("Failed to add wrapping directory");
    }

    let mut entries: Vec<_> = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .collect();
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in entries {
        let relative = entry
            .path()
            .strip_prefix(src)
            .expect("Walked path outside source directory")
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

/// Recursively copy a directory
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    if !dst.exists() {
        std::fs::create_dir_all(dst)?;
    }

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}
