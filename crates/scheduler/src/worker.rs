//! One-shot background threshold worker
//!
//! Each dispatch spawns a named thread that binarizes a snapshot of the
//! sample buffer and reports back through an mpsc channel. The worker never
//! touches live viewer state: it owns its snapshot, and the coordination
//! thread drains outcomes on its own turn.

use lithview_core::{binarize, SampleBuffer};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Errors produced by a threshold job
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The computation panicked
    #[error("threshold job panicked: {0}")]
    Panicked(String),
}

/// Completion message for a single threshold job.
///
/// Exactly one outcome is sent per dispatched job, carrying the threshold
/// the job was dispatched with so the receiver can correlate it.
#[derive(Debug)]
pub struct JobOutcome {
    pub threshold: u8,
    pub result: Result<SampleBuffer, WorkerError>,
}

/// Spawn a one-shot background job that binarizes `snapshot` at `threshold`.
///
/// The outcome is sent through `sender` and then `notify` runs, letting the
/// caller wake its event loop. A send failure means the receiver is gone
/// (the viewer shut down) and is ignored. Returns an error only if the
/// thread itself could not be spawned; in that case no outcome will arrive
/// and the caller must clear its own bookkeeping.
pub fn spawn_threshold_job(
    snapshot: Arc<SampleBuffer>,
    threshold: u8,
    sender: Sender<JobOutcome>,
    notify: impl FnOnce() + Send + 'static,
) -> io::Result<()> {
    thread::Builder::new()
        .name("lithview-threshold-worker".to_owned())
        .spawn(move || {
            let result = execute(move || binarize(&snapshot, threshold));

            if let Err(error) = &result {
                log::error!("threshold job for {threshold} failed: {error}");
            }

            let _ = sender.send(JobOutcome { threshold, result });
            notify();
        })?;

    Ok(())
}

/// Run a computation, converting a panic into an error.
///
/// The completion message must be sent exactly once per job, including when
/// the computation panics.
fn execute<F>(compute: F) -> Result<SampleBuffer, WorkerError>
where
    F: FnOnce() -> SampleBuffer,
{
    panic::catch_unwind(AssertUnwindSafe(compute))
        .map_err(|payload| WorkerError::Panicked(panic_message(payload)))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
