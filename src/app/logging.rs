//! Progress logging.

use log::info;

use crate::batch::{BatchState, JobStatus};

/// Logs one progress line for a running batch.
///
/// # Arguments
///
/// * `start_time` - When the batch was started
/// * `state` - Current snapshot of the batch
pub fn log_progress(start_time: std::time::Instant, state: &BatchState) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let settled = state.settled_jobs();
    let rate = if elapsed_secs > 0.0 {
        settled as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Audited {}/{} pages ({} failed, {} analyzing{}) in {:.2} seconds (~{:.2} pages/sec)",
        settled,
        state.total_jobs,
        state.failed_jobs,
        state.count(JobStatus::Analyzing),
        if state.is_paused { ", paused" } else { "" },
        elapsed_secs,
        rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_does_not_panic() {
        log_progress(std::time::Instant::now(), &BatchState::default());
    }
}
