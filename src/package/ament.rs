// src/package/ament.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{LaunchError, Result};
use crate::fs::FileSystem;
use crate::package::PackageLocator;

pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

/// Marker directory every ament package registers itself in.
const RESOURCE_INDEX_PACKAGES: &str = "share/ament_index/resource_index/packages";

/// Package lookup over an ordered list of install prefixes.
///
/// A prefix provides `package` when
/// `<prefix>/share/ament_index/resource_index/packages/<package>` is a file.
/// The first matching prefix wins.
#[derive(Debug, Clone)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
    fs: Arc<dyn FileSystem>,
}

impl AmentIndex {
    pub fn new(prefixes: Vec<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self { prefixes, fs }
    }

    /// Build from the `AMENT_PREFIX_PATH` environment variable.
    ///
    /// An unset or empty variable yields an index with no prefixes, so every
    /// lookup fails with `PackageNotFound`.
    pub fn from_env(fs: Arc<dyn FileSystem>) -> Self {
        let raw = std::env::var(AMENT_PREFIX_PATH).unwrap_or_default();
        Self::new(parse_prefix_path(&raw), fs)
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    fn package_prefix(&self, package: &str) -> Result<&Path> {
        if self.prefixes.is_empty() {
            return Err(LaunchError::PackageNotFound(format!(
                "'{package}' ({AMENT_PREFIX_PATH} is not set)"
            )));
        }

        for prefix in &self.prefixes {
            let marker = prefix.join(RESOURCE_INDEX_PACKAGES).join(package);
            trace!(marker = %marker.display(), "checking resource index");
            if self.fs.is_file(&marker) {
                debug!(package, prefix = %prefix.display(), "found package");
                return Ok(prefix);
            }
        }

        Err(LaunchError::PackageNotFound(format!(
            "'{package}' is not in any prefix of {AMENT_PREFIX_PATH}"
        )))
    }
}

impl PackageLocator for AmentIndex {
    fn share_directory(&self, package: &str) -> Result<PathBuf> {
        let prefix = self.package_prefix(package)?;
        Ok(prefix.join("share").join(package))
    }

    fn executable_path(&self, package: &str, executable: &str) -> Result<PathBuf> {
        let prefix = self.package_prefix(package)?;
        let exe = prefix.join("lib").join(package).join(executable);
        if !self.fs.is_file(&exe) {
            return Err(LaunchError::PackageNotFound(format!(
                "executable '{executable}' not found in package '{package}' ({})",
                exe.display()
            )));
        }
        Ok(exe)
    }
}

/// Split a `:`-separated prefix list, dropping empty entries.
pub fn parse_prefix_path(raw: &str) -> Vec<PathBuf> {
    raw.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
