// src/package/mod.rs

//! Package lookup.
//!
//! Resolution never touches the process environment directly; it asks a
//! [`PackageLocator`] where a package lives. Production code uses
//! [`AmentIndex`], which searches `AMENT_PREFIX_PATH` the way
//! `ament_index` does. Tests and `--package-share` overrides use
//! [`FixedPackageLocator`].

use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::Result;

pub mod ament;
pub mod fixed;

pub use ament::{AMENT_PREFIX_PATH, AmentIndex};
pub use fixed::FixedPackageLocator;

/// Finds the installed directories of a named package.
pub trait PackageLocator: Send + Sync + Debug {
    /// Share directory of `package` (e.g. `<prefix>/share/<package>`).
    ///
    /// Fails with [`LaunchError::PackageNotFound`](crate::errors::LaunchError::PackageNotFound).
    fn share_directory(&self, package: &str) -> Result<PathBuf>;

    /// Full path of `executable` installed by `package`.
    fn executable_path(&self, package: &str, executable: &str) -> Result<PathBuf>;
}
