// src/launch/spec.rs

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use serde::Serialize;

use crate::config::ParameterValue;
use crate::launch::template::{OutputMode, Remapping};

/// Fully resolved launch unit handed to a process supervisor.
///
/// Only the resolver builds these. There are no setters; a supervisor takes
/// the process spec by value and consumes it once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedProcessSpec {
    package: String,
    executable: String,
    name: String,
    parameters: BTreeMap<String, ParameterValue>,
    remappings: Vec<Remapping>,
    arguments: Vec<String>,
    output: OutputMode,
}

impl ResolvedProcessSpec {
    pub(crate) fn new(
        package: String,
        executable: String,
        name: String,
        parameters: BTreeMap<String, ParameterValue>,
        remappings: Vec<Remapping>,
        arguments: Vec<String>,
        output: OutputMode,
    ) -> Self {
        Self {
            package,
            executable,
            name,
            parameters,
            remappings,
            arguments,
            output,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified node name in the root namespace.
    pub fn node_fqn(&self) -> String {
        format!("/{}", self.name)
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParameterValue> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    pub fn remappings(&self) -> &[Remapping] {
        &self.remappings
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Build the argv for this node.
    ///
    /// Layout:
    /// `<exe> <arguments...> --ros-args -r __node:=<name> --params-file <file> -r <from>:=<to>...`
    pub fn command_line(&self, executable_path: &Path, params_file: &Path) -> Vec<OsString> {
        let mut cmd: Vec<OsString> =
            Vec::with_capacity(6 + self.arguments.len() + 2 * self.remappings.len());
        cmd.push(executable_path.into());
        cmd.extend(self.arguments.iter().map(OsString::from));

        cmd.push("--ros-args".into());
        cmd.push("-r".into());
        cmd.push(format!("__node:={}", self.name).into());
        cmd.push("--params-file".into());
        cmd.push(params_file.into());

        for remap in &self.remappings {
            cmd.push("-r".into());
            cmd.push(remap.as_rule().into());
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec() -> ResolvedProcessSpec {
        let mut params = BTreeMap::new();
        params.insert("a".to_string(), ParameterValue::Integer(1));
        ResolvedProcessSpec::new(
            "pkg".into(),
            "node_exe".into(),
            "node".into(),
            params,
            vec![
                Remapping::new("/in", "/camera"),
                Remapping::new("/out", "/detections"),
            ],
            vec!["--ros-args".into(), "--log-level".into(), "info".into()],
            OutputMode::Screen,
        )
    }

    #[test]
    fn command_line_layout() {
        let cmd = spec().command_line(
            &PathBuf::from("/ws/lib/pkg/node_exe"),
            &PathBuf::from("/tmp/params.yaml"),
        );
        let cmd: Vec<String> = cmd
            .into_iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            cmd,
            vec![
                "/ws/lib/pkg/node_exe",
                "--ros-args",
                "--log-level",
                "info",
                "--ros-args",
                "-r",
                "__node:=node",
                "--params-file",
                "/tmp/params.yaml",
                "-r",
                "/in:=/camera",
                "-r",
                "/out:=/detections",
            ]
        );
    }

    #[test]
    fn serializes_output_mode_lowercase() {
        let json = serde_json::to_value(spec()).unwrap();
        assert_eq!(json["output"], "screen");
        assert_eq!(json["remappings"][0]["from"], "/in");
        assert_eq!(json["parameters"]["a"], 1);
    }

    #[test]
    fn node_fqn_is_rooted() {
        assert_eq!(spec().node_fqn(), "/node");
    }
}
