// src/launch/template.rs

//! Static description of the node a launch produces.

use serde::Serialize;

/// A `(from, to)` topic remapping, applied in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remapping {
    pub from: String,
    pub to: String,
}

impl Remapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `from:=to`, as passed after `-r` on the ROS command line.
    pub fn as_rule(&self) -> String {
        format!("{}:={}", self.from, self.to)
    }
}

/// Where the launched process writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// stdout/stderr are inherited from the launcher.
    Screen,
}

/// Everything about a node launch that does not depend on launch arguments
/// or the parameter file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTemplate {
    /// Package that installs `executable`.
    pub package: String,
    pub executable: String,
    pub name: String,
    /// Package whose share directory anchors the path-valued parameters.
    pub share_package: String,
    /// Subdirectory of the share directory the path parameters are relative to.
    pub path_subdir: String,
    /// Parameters rewritten to `<share>/<path_subdir>/<value>`.
    pub path_parameters: Vec<String>,
    pub remappings: Vec<Remapping>,
    pub arguments: Vec<String>,
    pub output: OutputMode,
}

impl NodeTemplate {
    pub fn yolo_racecar_detector() -> Self {
        Self {
            package: "yolo_racecar_detector".to_string(),
            executable: "yolo_racecar_detector_node_exe".to_string(),
            name: "yolo_racecar_detector_node".to_string(),
            share_package: "f1tenth_launch".to_string(),
            path_subdir: "config/yolo_perception".to_string(),
            path_parameters: vec!["onnx_model_path".to_string(), "trt_engine_path".to_string()],
            remappings: vec![
                Remapping::new("/in/image", "/sensing/camera/image_raw"),
                Remapping::new("/out/image", "/yolo_racecar_detector/viz/image_with_bboxes"),
                Remapping::new("/out/objects", "/yolo_racecar_detector/objects"),
            ],
            arguments: ["--ros-args", "--log-level", "info", "--enable-stdout-logs"]
                .into_iter()
                .map(String::from)
                .collect(),
            output: OutputMode::Screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remapping_rule_uses_ros_syntax() {
        let r = Remapping::new("/in/image", "/sensing/camera/image_raw");
        assert_eq!(r.as_rule(), "/in/image:=/sensing/camera/image_raw");
    }

    #[test]
    fn detector_template_has_three_remappings_in_order() {
        let t = NodeTemplate::yolo_racecar_detector();
        let froms: Vec<&str> = t.remappings.iter().map(|r| r.from.as_str()).collect();
        assert_eq!(froms, vec!["/in/image", "/out/image", "/out/objects"]);
        assert_eq!(t.output, OutputMode::Screen);
    }
}
