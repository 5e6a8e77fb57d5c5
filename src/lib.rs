// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod launch;
pub mod logging;
pub mod package;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, OutputFormat};
use crate::exec::{ProcessSupervisor, RealSupervisor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::launch::{
    LaunchArgument, LaunchResolver, PARAM_FILE_ARG, ResolvedProcessSpec, parse_assignments,
};
use crate::package::{AmentIndex, FixedPackageLocator, PackageLocator};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - launch argument parsing
/// - package lookup (ament index, plus `--package-share` overrides)
/// - resolution of the detector launch
/// - dry-run printing, or handing the process spec to the real supervisor
///
/// Returns the exit code the launcher should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let locator = build_locator(&args, Arc::clone(&fs))?;

    let resolver = LaunchResolver::new(locator.as_ref(), fs.as_ref());

    if args.show_args {
        print_declared_arguments(resolver.declared_arguments());
        return Ok(0);
    }

    let provided = collect_launch_args(&args)?;
    let spec = resolver.resolve(&provided)?;

    if args.dry_run {
        println!("{}", render_spec(&spec, args.format)?);
        debug!("dry-run complete (no execution)");
        return Ok(0);
    }

    let mut supervisor = RealSupervisor::new(Arc::clone(&locator));
    let exit = supervisor.launch(spec).await?;

    if exit.success() {
        info!("node process finished successfully");
    } else {
        warn!(?exit, code = exit.code(), "node process did not finish successfully");
    }
    Ok(exit.code())
}

/// Merge positional `name:=value` tokens with the `--param-file` shorthand.
///
/// `--param-file` wins over a positional `param_file:=...`.
pub fn collect_launch_args(args: &CliArgs) -> Result<BTreeMap<String, String>> {
    let mut provided = parse_assignments(&args.launch_args)?;
    if let Some(path) = &args.param_file {
        provided.insert(PARAM_FILE_ARG.to_string(), path.to_string_lossy().into_owned());
    }
    Ok(provided)
}

fn build_locator(args: &CliArgs, fs: Arc<dyn FileSystem>) -> Result<Arc<dyn PackageLocator>> {
    let index = AmentIndex::from_env(fs);
    debug!(prefixes = ?index.prefixes(), "ament prefixes");

    let overrides = FixedPackageLocator::from_overrides(&args.package_share)?;
    if overrides.is_empty() {
        return Ok(Arc::new(index));
    }
    Ok(Arc::new(overrides.with_fallback(Box::new(index))))
}

/// Serialize a spec for `--dry-run`.
pub fn render_spec(spec: &ResolvedProcessSpec, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(spec).context("serializing spec as YAML"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(spec).context("serializing spec as JSON")
        }
    }
}

fn print_declared_arguments(declared: &[LaunchArgument]) {
    println!("Arguments (pass arguments as '<name>:=<value>'):");
    for arg in declared {
        println!();
        println!("    '{}':", arg.name);
        println!("        {}", arg.description);
        match &arg.default_value {
            Some(default) => println!("        (default: '{default}')"),
            None => println!("        (required)"),
        }
    }
}
