//! Lithview Scheduler Library
//!
//! Debounce scheduling and background execution for slider-driven
//! recomputation.
//!
//! The viewer recomputes its binarized frame whenever the threshold slider
//! moves. Recomputation runs on a one-shot background thread so the UI never
//! blocks; the [`DebounceScheduler`] guarantees at most one computation is in
//! flight at a time, coalesces the slider values that arrive while one is
//! running, and suppresses requests that differ from the running one by no
//! more than [`DEBOUNCE_EPSILON`].
//!
//! # Example
//!
//! ```
//! use lithview_scheduler::DebounceScheduler;
//!
//! let mut scheduler = DebounceScheduler::new();
//!
//! // First request dispatches immediately.
//! assert_eq!(scheduler.request(127), Some(127));
//!
//! // Small jitter near the in-flight value is dropped.
//! assert_eq!(scheduler.request(130), None);
//!
//! // A materially different value is parked as pending.
//! assert_eq!(scheduler.request(200), None);
//!
//! // Completion hands back the pending value for the next dispatch.
//! assert_eq!(scheduler.complete(), Some(200));
//! ```

mod debounce;
mod worker;

pub use debounce::{DebounceScheduler, DEBOUNCE_EPSILON};
pub use worker::{spawn_threshold_job, JobOutcome, WorkerError};
