//! Initialization progress reporting and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receives human-readable progress messages during initialization.
///
/// Called from worker threads while the catalog is being built.
pub trait ProgressSink: Sync {
    fn state(&self, message: &str);
}

/// Discards all progress.
impl ProgressSink for () {
    fn state(&self, _message: &str) {}
}

/// Forwards progress to the `tracing` subscriber.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn state(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Shared flag used to abort an in-progress initialization.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
