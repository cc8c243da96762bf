//! Progress reporting for table export.
//!
//! [`ProgressCallback`] keeps the export loop independent of how progress
//! is shown. The CLI renders it with `indicatif`; library callers and tests
//! pass [`null_progress()`].

use std::sync::Arc;

/// Receives progress updates while tables are written.
pub trait ProgressCallback: Send + Sync {
    /// Set the number of files that will be written.
    fn set_total(&self, total: u64);

    /// Advance by `delta` files.
    fn inc(&self, delta: u64);

    /// Update the message shown next to the indicator (usually the table
    /// being written).
    fn set_message(&self, msg: String);

    /// Mark the export as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
