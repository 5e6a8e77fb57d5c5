#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use launch_resolver::fs::mock::MockFileSystem;
use launch_resolver::package::FixedPackageLocator;

/// Builder for parameter file YAML.
///
/// Produces the `/**` → `ros__parameters` layout the resolver expects, with
/// values written verbatim as YAML scalars.
pub struct ParamsFileBuilder {
    params: BTreeMap<String, String>,
    namespace: String,
    wrapper: String,
}

impl ParamsFileBuilder {
    pub fn new() -> Self {
        Self {
            params: BTreeMap::new(),
            namespace: "/**".to_string(),
            wrapper: "ros__parameters".to_string(),
        }
    }

    /// Start from the two path parameters the detector requires.
    pub fn detector(onnx: &str, engine: &str) -> Self {
        Self::new()
            .param("onnx_model_path", onnx)
            .param("trt_engine_path", engine)
    }

    /// Add a parameter. `yaml_value` is inserted as-is, so quote strings
    /// that would otherwise parse as numbers or booleans.
    pub fn param(mut self, name: &str, yaml_value: &str) -> Self {
        self.params.insert(name.to_string(), yaml_value.to_string());
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.params.remove(name);
        self
    }

    /// Replace the `/**` top-level key.
    pub fn namespace(mut self, key: &str) -> Self {
        self.namespace = key.to_string();
        self
    }

    /// Replace the `ros__parameters` key.
    pub fn wrapper(mut self, key: &str) -> Self {
        self.wrapper = key.to_string();
        self
    }

    pub fn build(&self) -> String {
        let mut out = format!("{}:\n  {}:\n", self.namespace, self.wrapper);
        for (name, value) in &self.params {
            out.push_str(&format!("    {name}: {value}\n"));
        }
        out
    }

    /// Write the YAML into `dir/name` and return the full path.
    pub fn write_to(&self, dir: &Path, name: &str) -> std::io::Result<PathBuf> {
        let path = dir.join(name);
        std::fs::write(&path, self.build())?;
        Ok(path)
    }

    /// Register the YAML at `path` in a mock filesystem.
    pub fn add_to(&self, fs: &MockFileSystem, path: &str) {
        fs.add_file(path, self.build());
    }
}

impl Default for ParamsFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `param_file:=<path>` as a provided-argument map.
pub fn param_file_args(path: impl AsRef<Path>) -> BTreeMap<String, String> {
    let mut args = BTreeMap::new();
    args.insert(
        "param_file".to_string(),
        path.as_ref().to_string_lossy().into_owned(),
    );
    args
}

/// Locator that maps the detector's share package to `share_dir`.
pub fn detector_locator(share_dir: impl Into<PathBuf>) -> FixedPackageLocator {
    FixedPackageLocator::new().with_share("f1tenth_launch", share_dir)
}
