// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::config::model::{
    PARAMETERS_KEY, ParameterDocument, ParameterValue, RawParameterFile, WILDCARD_NAMESPACE,
};
use crate::errors::{LaunchError, Result};

impl TryFrom<RawParameterFile> for ParameterDocument {
    type Error = crate::errors::LaunchError;

    fn try_from(raw: RawParameterFile) -> std::result::Result<Self, Self::Error> {
        let block = parameters_block(&raw.path, &raw.root)?;
        let mut params = BTreeMap::new();
        flatten_mapping(&raw.path, "", block, &mut params)?;
        Ok(ParameterDocument::new_unchecked(raw.path, params))
    }
}

/// Walk `/**` → `ros__parameters` and return the inner mapping.
fn parameters_block<'a>(path: &Path, root: &'a Value) -> Result<&'a Mapping> {
    let root = root.as_mapping().ok_or_else(|| {
        LaunchError::config_load(path, "document must be a mapping at the top level")
    })?;

    let node_block = root
        .get(WILDCARD_NAMESPACE)
        .ok_or_else(|| {
            LaunchError::config_load(path, format!("missing top-level key '{WILDCARD_NAMESPACE}'"))
        })?
        .as_mapping()
        .ok_or_else(|| {
            LaunchError::config_load(path, format!("'{WILDCARD_NAMESPACE}' must be a mapping"))
        })?;

    node_block
        .get(PARAMETERS_KEY)
        .ok_or_else(|| {
            LaunchError::config_load(
                path,
                format!("missing key '{PARAMETERS_KEY}' under '{WILDCARD_NAMESPACE}'"),
            )
        })?
        .as_mapping()
        .ok_or_else(|| {
            LaunchError::config_load(
                path,
                format!("'{WILDCARD_NAMESPACE}.{PARAMETERS_KEY}' must be a mapping"),
            )
        })
}

fn flatten_mapping(
    path: &Path,
    prefix: &str,
    mapping: &Mapping,
    out: &mut BTreeMap<String, ParameterValue>,
) -> Result<()> {
    for (key, value) in mapping {
        let key = key.as_str().ok_or_else(|| {
            LaunchError::config_load(path, format!("parameter names must be strings (got {key:?})"))
        })?;
        let name = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Mapping(nested) => flatten_mapping(path, &name, nested, out)?,
            other => {
                let converted = convert_value(path, &name, other)?;
                out.insert(name, converted);
            }
        }
    }
    Ok(())
}

fn convert_value(path: &Path, name: &str, value: &Value) -> Result<ParameterValue> {
    match value {
        Value::Sequence(items) => {
            if items.is_empty() {
                return Err(LaunchError::config_load(
                    path,
                    format!("parameter '{name}' is an empty array with no element type"),
                ));
            }
            let converted = items
                .iter()
                .map(|item| convert_scalar(path, name, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParameterValue::Array(normalize_array(path, name, converted)?))
        }
        other => convert_scalar(path, name, other),
    }
}

fn convert_scalar(path: &Path, name: &str, value: &Value) -> Result<ParameterValue> {
    match value {
        Value::Bool(b) => Ok(ParameterValue::Bool(*b)),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(ParameterValue::Integer(i)),
            (None, _) if n.is_u64() => Err(LaunchError::config_load(
                path,
                format!("parameter '{name}' is an integer out of range for int64"),
            )),
            (None, Some(f)) => Ok(ParameterValue::Double(f)),
            (None, None) => Err(LaunchError::config_load(
                path,
                format!("parameter '{name}' has an unrepresentable number"),
            )),
        },
        Value::String(s) => Ok(ParameterValue::String(s.clone())),
        Value::Null => Err(LaunchError::config_load(
            path,
            format!("parameter '{name}' has no value"),
        )),
        Value::Sequence(_) | Value::Mapping(_) => Err(LaunchError::config_load(
            path,
            format!("parameter '{name}' arrays may only contain scalars"),
        )),
        Value::Tagged(_) => Err(LaunchError::config_load(
            path,
            format!("parameter '{name}' uses an unsupported YAML tag"),
        )),
    }
}

/// Arrays must hold one element type. Integers mixed with doubles are
/// promoted to a double array.
fn normalize_array(
    path: &Path,
    name: &str,
    items: Vec<ParameterValue>,
) -> Result<Vec<ParameterValue>> {
    let numeric = |v: &ParameterValue| {
        matches!(v, ParameterValue::Integer(_) | ParameterValue::Double(_))
    };
    if items.iter().all(numeric) && items.iter().any(|v| matches!(v, ParameterValue::Double(_))) {
        return Ok(items
            .into_iter()
            .map(|v| match v {
                ParameterValue::Integer(i) => ParameterValue::Double(i as f64),
                other => other,
            })
            .collect());
    }

    if let Some(first) = items.first() {
        let expected = first.type_name();
        if let Some(bad) = items.iter().find(|v| v.type_name() != expected) {
            return Err(LaunchError::config_load(
                path,
                format!(
                    "parameter '{name}' mixes {expected} and {} array elements",
                    bad.type_name()
                ),
            ));
        }
    }
    Ok(items)
}
