// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::model::{ParameterDocument, RawParameterFile};
use crate::errors::{LaunchError, Result};
use crate::fs::FileSystem;

/// Read a parameter file and parse it as YAML.
///
/// This only performs YAML deserialization; it does **not** check for the
/// `/**` → `ros__parameters` wrapper. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawParameterFile> {
    let path = path.as_ref();
    let contents = fs
        .read_to_string(path)
        .map_err(|e| LaunchError::config_load(path, format!("{e:#}")))?;

    let root: serde_yaml::Value = serde_yaml::from_str(&contents)
        .map_err(|e| LaunchError::config_load(path, format!("invalid YAML: {e}")))?;

    Ok(RawParameterFile {
        path: path.to_path_buf(),
        root,
    })
}

/// Read, parse and validate a parameter file.
///
/// This is the entry point the resolver uses: the returned document is flat,
/// typed, and known to come from a `/**` → `ros__parameters` block.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ParameterDocument> {
    let raw = load_from_path(fs, &path)?;
    let doc = ParameterDocument::try_from(raw)?;
    debug!(
        path = %doc.source().display(),
        params = doc.len(),
        "loaded parameter document"
    );
    Ok(doc)
}
