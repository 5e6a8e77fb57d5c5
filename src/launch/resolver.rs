// src/launch/resolver.rs

//! Turns launch arguments + a parameter file into a [`ResolvedProcessSpec`].
//!
//! Order of operations:
//! 1. Apply defaults to the provided launch arguments.
//! 2. Look up the share directory of the template's share package.
//! 3. Read and validate the parameter file.
//! 4. Rewrite path-valued parameters under `<share>/<path_subdir>`.
//! 5. Assemble the process spec.
//!
//! The share lookup happens before the parameter file is read, so a missing
//! package never costs a read. Any failure aborts; no partial spec escapes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{ParameterValue, load_and_validate};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::launch::args::{LaunchArgument, resolve_arguments};
use crate::launch::spec::ResolvedProcessSpec;
use crate::launch::template::NodeTemplate;
use crate::launch::{PARAM_FILE_ARG, declared_arguments};
use crate::package::PackageLocator;

pub struct LaunchResolver<'a> {
    locator: &'a dyn PackageLocator,
    fs: &'a dyn FileSystem,
    template: NodeTemplate,
    declared: Vec<LaunchArgument>,
}

impl<'a> LaunchResolver<'a> {
    /// Resolver for the YOLO racecar detector launch.
    pub fn new(locator: &'a dyn PackageLocator, fs: &'a dyn FileSystem) -> Self {
        Self::with_template(
            locator,
            fs,
            NodeTemplate::yolo_racecar_detector(),
            declared_arguments(),
        )
    }

    /// Resolver for an arbitrary node template.
    ///
    /// `declared` must declare [`PARAM_FILE_ARG`]; otherwise every resolution
    /// fails with `MissingArgument`.
    pub fn with_template(
        locator: &'a dyn PackageLocator,
        fs: &'a dyn FileSystem,
        template: NodeTemplate,
        declared: Vec<LaunchArgument>,
    ) -> Self {
        Self {
            locator,
            fs,
            template,
            declared,
        }
    }

    pub fn template(&self) -> &NodeTemplate {
        &self.template
    }

    pub fn declared_arguments(&self) -> &[LaunchArgument] {
        &self.declared
    }

    /// Resolve the launch for the given `name:=value` argument map.
    pub fn resolve(&self, provided: &BTreeMap<String, String>) -> Result<ResolvedProcessSpec> {
        let configs = resolve_arguments(&self.declared, provided)?;
        let param_file = PathBuf::from(configs.require(PARAM_FILE_ARG)?);

        let share_dir = self.locator.share_directory(&self.template.share_package)?;
        debug!(
            package = %self.template.share_package,
            share_dir = %share_dir.display(),
            "resolved package share directory"
        );

        let document = load_and_validate(self.fs, &param_file)?;

        let base = share_dir.join(&self.template.path_subdir);
        let mut rewritten = Vec::with_capacity(self.template.path_parameters.len());
        for key in &self.template.path_parameters {
            let value = document.require_str(key)?;
            rewritten.push((key.clone(), rebase(&base, key, value)));
        }

        let mut parameters = document.into_params();
        for (key, path) in rewritten {
            parameters.insert(key, ParameterValue::String(path));
        }

        let spec = ResolvedProcessSpec::new(
            self.template.package.clone(),
            self.template.executable.clone(),
            self.template.name.clone(),
            parameters,
            self.template.remappings.clone(),
            self.template.arguments.clone(),
            self.template.output,
        );

        info!(
            node = %spec.name(),
            executable = %spec.executable(),
            param_file = %param_file.display(),
            params = spec.parameters().len(),
            "resolved launch"
        );

        Ok(spec)
    }
}

/// Pure path join; the target need not exist.
///
/// An absolute `value` replaces `base`, same as `Path::join`.
fn rebase(base: &Path, key: &str, value: &str) -> String {
    if Path::new(value).is_absolute() {
        warn!(parameter = key, value, "absolute path ignores the package share directory");
    }
    base.join(value).to_string_lossy().into_owned()
}
