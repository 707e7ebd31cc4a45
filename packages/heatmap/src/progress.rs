//! Load-stage progress hooks.
//!
//! The loader reports how far into the input file it has read, in bytes.
//! Terminal rendering is left to `crime_heatmap_cli_utils`.

use std::sync::Arc;

/// Receives byte-offset updates while the incident CSV is read.
pub trait ProgressCallback: Send + Sync {
    /// Size of the input file in bytes.
    fn set_total(&self, total: u64);

    /// Byte offset reached in the input file.
    fn set_position(&self, pos: u64);

    /// Replaces the status text.
    fn set_message(&self, msg: String);

    /// Called once loading is done, with a summary line.
    fn finish(&self, msg: String);
}

/// Discards every update. Used by tests and library callers without a
/// terminal.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
