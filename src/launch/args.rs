// src/launch/args.rs

//! Launch argument declaration and resolution.
//!
//! Arguments arrive on the command line as `name:=value` tokens, the same
//! syntax `ros2 launch` uses.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::errors::{LaunchError, Result};

/// A declared launch argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgument {
    pub name: String,
    pub default_value: Option<String>,
    pub description: String,
}

impl LaunchArgument {
    /// Declare an argument that must be supplied by the caller.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            description: description.into(),
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.default_value.is_none()
    }
}

/// Concrete argument values after defaults have been applied.
///
/// Fixed once built; resolution only reads from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchConfigurations {
    values: BTreeMap<String, String>,
}

impl LaunchConfigurations {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| LaunchError::MissingArgument(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split a `name:=value` token.
///
/// The value may be empty or contain further `:=` sequences; only the first
/// separator counts.
pub fn parse_assignment(token: &str) -> Result<(String, String)> {
    let (name, value) = token.split_once(":=").ok_or_else(|| {
        LaunchError::InvalidArgument(format!("'{token}' is not of the form name:=value"))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(LaunchError::InvalidArgument(format!(
            "'{token}' has an empty argument name"
        )));
    }

    Ok((name.to_string(), value.to_string()))
}

/// Parse every token; later assignments to the same name win.
pub fn parse_assignments<I, S>(tokens: I) -> Result<BTreeMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeMap::new();
    for token in tokens {
        let (name, value) = parse_assignment(token.as_ref())?;
        out.insert(name, value);
    }
    Ok(out)
}

/// Combine declarations with provided values.
///
/// - a provided value always wins over the default
/// - a required argument with no provided value is an error
/// - undeclared provided values are kept, with a warning
pub fn resolve_arguments(
    declared: &[LaunchArgument],
    provided: &BTreeMap<String, String>,
) -> Result<LaunchConfigurations> {
    let mut values = BTreeMap::new();

    for arg in declared {
        let value = match (provided.get(&arg.name), &arg.default_value) {
            (Some(v), _) => v.clone(),
            (None, Some(default)) => {
                debug!(argument = %arg.name, value = %default, "using default");
                default.clone()
            }
            (None, None) => return Err(LaunchError::MissingArgument(arg.name.clone())),
        };
        values.insert(arg.name.clone(), value);
    }

    for (name, value) in provided {
        if !declared.iter().any(|a| &a.name == name) {
            warn!(argument = %name, "argument was provided but never declared");
            values.insert(name.clone(), value.clone());
        }
    }

    Ok(LaunchConfigurations { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provided(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_assignment_splits_on_first_separator() {
        assert_eq!(
            parse_assignment("param_file:=/a:=b.yaml").unwrap(),
            ("param_file".to_string(), "/a:=b.yaml".to_string())
        );
        assert_eq!(
            parse_assignment("flag:=").unwrap(),
            ("flag".to_string(), String::new())
        );
    }

    #[test]
    fn parse_assignment_rejects_bad_tokens() {
        assert!(matches!(
            parse_assignment("param_file=/a.yaml"),
            Err(LaunchError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_assignment(" :=x"),
            Err(LaunchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn later_assignments_override_earlier_ones() {
        let map = parse_assignments(["a:=1", "a:=2"]).unwrap();
        assert_eq!(map.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn required_argument_must_be_provided() {
        let declared = vec![LaunchArgument::required("param_file", "")];
        let err = resolve_arguments(&declared, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, LaunchError::MissingArgument(ref n) if n == "param_file"));
    }

    #[test]
    fn defaults_apply_and_provided_values_win() {
        let declared = vec![
            LaunchArgument::required("param_file", ""),
            LaunchArgument::required("log_level", "").with_default("info"),
            LaunchArgument::required("namespace", "").with_default(""),
        ];
        let cfg = resolve_arguments(
            &declared,
            &provided(&[("param_file", "/p.yaml"), ("namespace", "car1")]),
        )
        .unwrap();

        assert_eq!(cfg.get("param_file"), Some("/p.yaml"));
        assert_eq!(cfg.get("log_level"), Some("info"));
        assert_eq!(cfg.get("namespace"), Some("car1"));
    }

    #[test]
    fn undeclared_arguments_are_kept() {
        let declared = vec![LaunchArgument::required("param_file", "")];
        let cfg = resolve_arguments(
            &declared,
            &provided(&[("param_file", "/p.yaml"), ("extra", "1")]),
        )
        .unwrap();
        assert_eq!(cfg.get("extra"), Some("1"));
        assert_eq!(cfg.iter().count(), 2);
    }
}
