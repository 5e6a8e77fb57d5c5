// src/config/mod.rs

//! Parameter document loading and validation.
//!
//! Responsibilities:
//! - Define the typed parameter model (`model.rs`).
//! - Read a YAML parameter file through the [`FileSystem`](crate::fs::FileSystem)
//!   abstraction (`loader.rs`).
//! - Check the `/**` → `ros__parameters` wrapper and convert untyped YAML into
//!   [`ParameterValue`]s at the boundary (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    PARAMETERS_KEY, ParameterDocument, ParameterValue, RawParameterFile, WILDCARD_NAMESPACE,
    render_params_file,
};
