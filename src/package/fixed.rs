// src/package/fixed.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::errors::{LaunchError, Result};
use crate::package::PackageLocator;

/// Locator backed by an explicit package → directory table.
///
/// Falls back to `fallback` (usually an [`AmentIndex`](super::AmentIndex))
/// for packages that were not overridden.
#[derive(Debug, Default)]
pub struct FixedPackageLocator {
    shares: BTreeMap<String, PathBuf>,
    lib_dirs: BTreeMap<String, PathBuf>,
    fallback: Option<Box<dyn PackageLocator>>,
}

impl FixedPackageLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_share(mut self, package: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.shares.insert(package.into(), dir.into());
        self
    }

    pub fn with_lib_dir(mut self, package: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.lib_dirs.insert(package.into(), dir.into());
        self
    }

    pub fn with_fallback(mut self, fallback: Box<dyn PackageLocator>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Parse `--package-share NAME=DIR` overrides.
    pub fn from_overrides<I, S>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locator = Self::new();
        for raw in overrides {
            let raw = raw.as_ref();
            let (name, dir) = raw
                .split_once('=')
                .filter(|(name, dir)| !name.trim().is_empty() && !dir.trim().is_empty())
                .ok_or_else(|| {
                    LaunchError::InvalidArgument(format!(
                        "package override '{raw}' must look like NAME=DIR"
                    ))
                })?;
            locator = locator.with_share(name.trim(), dir.trim());
        }
        Ok(locator)
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty() && self.lib_dirs.is_empty()
    }
}

impl PackageLocator for FixedPackageLocator {
    fn share_directory(&self, package: &str) -> Result<PathBuf> {
        if let Some(dir) = self.shares.get(package) {
            return Ok(dir.clone());
        }
        match &self.fallback {
            Some(fallback) => fallback.share_directory(package),
            None => Err(LaunchError::PackageNotFound(format!(
                "'{package}' has no configured share directory"
            ))),
        }
    }

    fn executable_path(&self, package: &str, executable: &str) -> Result<PathBuf> {
        if let Some(dir) = self.lib_dirs.get(package) {
            return Ok(dir.join(executable));
        }
        match &self.fallback {
            Some(fallback) => fallback.executable_path(package, executable),
            None => Err(LaunchError::PackageNotFound(format!(
                "'{package}' has no configured lib directory"
            ))),
        }
    }
}
