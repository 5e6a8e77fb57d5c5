// src/exec/backend.rs

//! Pluggable supervisor abstraction.
//!
//! Resolution ends by handing a [`ResolvedProcessSpec`] to a
//! `ProcessSupervisor`. Production code uses
//! [`RealSupervisor`](super::supervisor::RealSupervisor); tests can provide
//! their own implementation that records specs instead of spawning anything.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::launch::ResolvedProcessSpec;

/// How a supervised process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// The process exited on its own with this status code.
    Exited(i32),
    /// The process was terminated by a signal it did not handle.
    Signaled,
    /// The launcher received Ctrl-C and killed the process.
    Interrupted,
}

impl ProcessExit {
    pub fn success(&self) -> bool {
        matches!(self, ProcessExit::Exited(0))
    }

    /// Exit code the launcher should report for this outcome.
    pub fn code(&self) -> i32 {
        match self {
            ProcessExit::Exited(code) => *code,
            ProcessExit::Signaled => 1,
            ProcessExit::Interrupted => 130,
        }
    }
}

/// Trait abstracting what happens to a resolved spec.
pub trait ProcessSupervisor: Send {
    /// Take ownership of `spec` and run it to completion.
    fn launch(
        &mut self,
        spec: ResolvedProcessSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessExit>> + Send + '_>>;
}
