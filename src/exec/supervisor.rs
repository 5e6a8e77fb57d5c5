// src/exec/supervisor.rs

//! Minimal supervisor: spawn once, pass output through, wait.
//!
//! There is no restart policy. Ctrl-C kills the child and reports
//! [`ProcessExit::Interrupted`].

use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use anyhow::Context;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::render_params_file;
use crate::errors::Result;
use crate::exec::backend::{ProcessExit, ProcessSupervisor};
use crate::launch::{OutputMode, ResolvedProcessSpec};
use crate::package::PackageLocator;

pub struct RealSupervisor {
    locator: Arc<dyn PackageLocator>,
}

impl RealSupervisor {
    pub fn new(locator: Arc<dyn PackageLocator>) -> Self {
        Self { locator }
    }

    /// Run `spec` until it exits or `stop` completes, whichever is first.
    ///
    /// When `stop` wins the child is killed and the outcome is
    /// [`ProcessExit::Interrupted`]. [`ProcessSupervisor::launch`] uses
    /// Ctrl-C as `stop`.
    pub async fn launch_until<F>(
        &self,
        spec: ResolvedProcessSpec,
        stop: F,
    ) -> Result<ProcessExit>
    where
        F: Future<Output = ()> + Send,
    {
        run_process(self.locator.as_ref(), spec, stop).await
    }
}

impl ProcessSupervisor for RealSupervisor {
    fn launch(
        &mut self,
        spec: ResolvedProcessSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessExit>> + Send + '_>> {
        Box::pin(self.launch_until(spec, ctrl_c()))
    }
}

/// Write the process spec's parameters to a temporary ROS 2 params file.
///
/// The file is removed when the returned handle drops, so keep it alive for
/// as long as the process runs.
pub fn write_params_file(spec: &ResolvedProcessSpec) -> anyhow::Result<NamedTempFile> {
    let yaml = render_params_file(&spec.node_fqn(), spec.parameters())
        .context("serializing node parameters")?;

    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}_", spec.name()))
        .suffix(".yaml")
        .tempfile()
        .context("creating temporary params file")?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("writing params file {:?}", file.path()))?;
    file.flush()?;

    Ok(file)
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; just wait for the child.
        std::future::pending::<()>().await;
    }
}

async fn run_process<F>(
    locator: &dyn PackageLocator,
    spec: ResolvedProcessSpec,
    stop: F,
) -> Result<ProcessExit>
where
    F: Future<Output = ()> + Send,
{
    let exe = locator.executable_path(spec.package(), spec.executable())?;
    let params_file = write_params_file(&spec)?;
    let argv = spec.command_line(&exe, params_file.path());

    debug!(node = %spec.name(), ?argv, "command line");

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);
    match spec.output() {
        OutputMode::Screen => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
    }
    cmd.kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for node '{}'", spec.name()))?;

    info!(
        node = %spec.name(),
        pid = ?child.id(),
        exe = %exe.display(),
        "node process started"
    );

    let outcome = tokio::select! {
        status = child.wait() => {
            let status = status
                .with_context(|| format!("waiting for process of node '{}'", spec.name()))?;
            match status.code() {
                Some(code) => ProcessExit::Exited(code),
                None => ProcessExit::Signaled,
            }
        }
        _ = stop => {
            warn!(node = %spec.name(), "interrupted, stopping node process");
            child
                .kill()
                .await
                .with_context(|| format!("killing process of node '{}'", spec.name()))?;
            ProcessExit::Interrupted
        }
    };

    info!(
        node = %spec.name(),
        ?outcome,
        success = outcome.success(),
        "node process exited"
    );

    drop(params_file);
    Ok(outcome)
}
