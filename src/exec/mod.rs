// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ProcessSupervisor` trait the launcher hands
//!   resolved specs to, and the `ProcessExit` outcome type.
//! - [`supervisor`] holds `RealSupervisor`, which writes the params file and
//!   runs the node with `tokio::process::Command`.

pub mod backend;
pub mod supervisor;

pub use backend::{ProcessExit, ProcessSupervisor};
pub use supervisor::{RealSupervisor, write_params_file};
