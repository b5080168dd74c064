//! Batch analysis over many URLs.
//!
//! This module provides:
//! - `BatchController`: bounded-concurrency scheduler with pause, resume and cancel
//! - `BatchState`/`BatchJob`: snapshots of a batch and its jobs
//! - `BatchStats`: aggregate statistics over a snapshot

mod controller;
mod state;
mod stats;

pub use controller::{BatchConfig, BatchController, BatchRun};
pub use state::{BatchJob, BatchMode, BatchState, JobStatus};
pub use stats::BatchStats;
