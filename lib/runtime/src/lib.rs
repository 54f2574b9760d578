//! Pod startup tracking: readiness evaluation, the lifecycle state machine,
//! and the loop that feeds it.

pub mod readiness;
pub mod runtime;
pub mod tracker;

pub use runtime::{RunSummary, run_until};
pub use tracker::LifecycleTracker;

#[cfg(test)]
mod tracker_test;
