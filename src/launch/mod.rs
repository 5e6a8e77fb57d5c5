// src/launch/mod.rs

//! Launch description and resolution.
//!
//! - [`args`] declares launch arguments and applies defaults.
//! - [`template`] holds the fixed node identity, remappings and arguments.
//! - [`resolver`] combines both with a parameter file into a spec.
//! - [`spec`] is the immutable result handed to a supervisor.

pub mod args;
pub mod resolver;
pub mod spec;
pub mod template;

pub use args::{LaunchArgument, LaunchConfigurations, parse_assignment, parse_assignments};
pub use resolver::LaunchResolver;
pub use spec::ResolvedProcessSpec;
pub use template::{NodeTemplate, OutputMode, Remapping};

/// Name of the launch argument pointing at the parameter file.
pub const PARAM_FILE_ARG: &str = "param_file";

/// Arguments declared by the detector launch.
pub fn declared_arguments() -> Vec<LaunchArgument> {
    vec![LaunchArgument::required(
        PARAM_FILE_ARG,
        "Path to the YOLO racecar detector parameter file",
    )]
}
