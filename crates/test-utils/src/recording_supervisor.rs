use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use launch_resolver::errors::Result;
use launch_resolver::exec::{ProcessExit, ProcessSupervisor};
use launch_resolver::launch::ResolvedProcessSpec;

/// A fake supervisor that:
/// - records every spec it is handed
/// - immediately reports the configured exit without spawning anything.
pub struct RecordingSupervisor {
    launched: Arc<Mutex<Vec<ResolvedProcessSpec>>>,
    exit: ProcessExit,
}

impl RecordingSupervisor {
    pub fn new(launched: Arc<Mutex<Vec<ResolvedProcessSpec>>>) -> Self {
        Self {
            launched,
            exit: ProcessExit::Exited(0),
        }
    }

    pub fn with_exit(mut self, exit: ProcessExit) -> Self {
        self.exit = exit;
        self
    }
}

impl ProcessSupervisor for RecordingSupervisor {
    fn launch(
        &mut self,
        spec: ResolvedProcessSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessExit>> + Send + '_>> {
        let launched = Arc::clone(&self.launched);
        let exit = self.exit;

        Box::pin(async move {
            launched.lock().unwrap().push(spec);
            Ok(exit)
        })
    }
}
