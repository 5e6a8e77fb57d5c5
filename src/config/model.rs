// src/config/model.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{LaunchError, Result};

/// Top-level key that applies a parameter block to every node.
pub const WILDCARD_NAMESPACE: &str = "/**";

/// Key wrapping the actual parameter map inside a node block.
pub const PARAMETERS_KEY: &str = "ros__parameters";

/// A single ROS 2 parameter value.
///
/// Arrays are non-empty, homogeneous and only ever hold scalars;
/// `validate.rs` enforces that when converting from YAML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<ParameterValue>),
}

impl ParameterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Integer(_) => "integer",
            ParameterValue::Double(_) => "double",
            ParameterValue::String(_) => "string",
            ParameterValue::Array(_) => "array",
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{b}"),
            ParameterValue::Integer(i) => write!(f, "{i}"),
            ParameterValue::Double(d) => write!(f, "{d:?}"),
            ParameterValue::String(s) => write!(f, "{s}"),
            ParameterValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A parameter file exactly as parsed from YAML, before any structural checks.
#[derive(Debug, Clone)]
pub struct RawParameterFile {
    pub path: PathBuf,
    pub root: serde_yaml::Value,
}

/// Validated, flat parameter set extracted from `/**` → `ros__parameters`.
///
/// Nested YAML mappings are flattened into dotted names, so `a: {b: 1}` is
/// stored as `a.b`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterDocument {
    source: PathBuf,
    params: BTreeMap<String, ParameterValue>,
}

impl ParameterDocument {
    /// Build a document without running validation.
    ///
    /// Callers are responsible for passing already-flat names.
    pub fn new_unchecked(
        source: impl Into<PathBuf>,
        params: BTreeMap<String, ParameterValue>,
    ) -> Self {
        Self {
            source: source.into(),
            params,
        }
    }

    /// File the document was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.params.get(name)
    }

    /// Look up a parameter that must be present and hold a non-empty string.
    pub fn require_str(&self, name: &str) -> Result<&str> {
        match self.params.get(name) {
            None => Err(LaunchError::config_load(
                &self.source,
                format!("missing required parameter '{name}' under '{WILDCARD_NAMESPACE}.{PARAMETERS_KEY}'"),
            )),
            Some(ParameterValue::String(s)) if s.trim().is_empty() => Err(
                LaunchError::config_load(&self.source, format!("parameter '{name}' is empty")),
            ),
            Some(ParameterValue::String(s)) => Ok(s),
            Some(other) => Err(LaunchError::config_load(
                &self.source,
                format!(
                    "parameter '{name}' must be a string path, got {}",
                    other.type_name()
                ),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.params.iter()
    }

    pub fn into_params(self) -> BTreeMap<String, ParameterValue> {
        self.params
    }
}

/// Render a flat parameter map as a ROS 2 params file for `node_fqn`.
///
/// ```yaml
/// /yolo_racecar_detector_node:
///   ros__parameters:
///     onnx_model_path: /opt/pkg/config/yolo_perception/model.onnx
/// ```
pub fn render_params_file(
    node_fqn: &str,
    params: &BTreeMap<String, ParameterValue>,
) -> serde_yaml::Result<String> {
    let mut inner = BTreeMap::new();
    inner.insert(PARAMETERS_KEY, params);
    let mut outer = BTreeMap::new();
    outer.insert(node_fqn, inner);
    serde_yaml::to_string(&outer)
}
