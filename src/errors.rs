// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Failed to load parameter file {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Launch argument '{0}' is required but was not provided")]
    MissingArgument(String),

    #[error("Invalid launch argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaunchError {
    pub(crate) fn config_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LaunchError::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn io_failures_surface_with_their_context() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LaunchError = Err::<(), _>(io)
            .context("creating temporary params file")
            .unwrap_err()
            .into();

        assert!(matches!(err, LaunchError::Other(_)));
        assert_eq!(err.to_string(), "creating temporary params file");
    }

    #[test]
    fn config_load_names_the_file() {
        let err = LaunchError::config_load("/cfg/p.yaml", "missing top-level key '/**'");
        assert_eq!(
            err.to_string(),
            "Failed to load parameter file /cfg/p.yaml: missing top-level key '/**'"
        );
    }
}
