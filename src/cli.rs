// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `launch-resolver`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "launch-resolver",
    version,
    about = "Resolve and launch the YOLO racecar detector node.",
    long_about = None
)]
pub struct CliArgs {
    /// Launch argument assignments in `name:=value` form.
    #[arg(value_name = "LAUNCH_ARGS")]
    pub launch_args: Vec<String>,

    /// Shorthand for `param_file:=PATH`.
    #[arg(long, value_name = "PATH")]
    pub param_file: Option<PathBuf>,

    /// Use DIR as the share directory of package NAME instead of searching
    /// `AMENT_PREFIX_PATH`. May be repeated.
    #[arg(long, value_name = "NAME=DIR")]
    pub package_share: Vec<String>,

    /// Resolve the launch and print the process spec, but don't start it.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for `--dry-run`.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "yaml")]
    pub format: OutputFormat,

    /// Print the declared launch arguments and exit.
    #[arg(long)]
    pub show_args: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LAUNCH_RESOLVER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Serialization used when printing a resolved spec.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
