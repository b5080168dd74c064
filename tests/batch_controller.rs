//! Scheduling tests for the batch controller: concurrency bound, pause,
//! resume and cancel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use heading_audit::{
    BatchConfig, BatchController, BatchMode, BatchState, FetchError, Fetcher, JobStatus,
};
use tokio::sync::{watch, Semaphore};
use tokio_util::sync::CancellationToken;

const PAGE: &str = "<main><h1>Seasonal vegetables to grow this spring</h1><h2>Peas</h2></main>";

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://example.com/page/{i}")).collect()
}

fn config(max_concurrency: usize) -> BatchConfig {
    BatchConfig {
        max_concurrency,
        admission_delay: Duration::ZERO,
        job_timeout: Duration::from_secs(10),
    }
}

async fn wait_until<P>(updates: &mut watch::Receiver<BatchState>, predicate: P) -> BatchState
where
    P: FnMut(&BatchState) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), updates.wait_for(predicate))
        .await
        .expect("state not reached in time")
        .expect("controller dropped")
        .clone()
}

#[derive(Default)]
struct Concurrency {
    current: AtomicUsize,
    peak: AtomicUsize,
}

/// Records how many fetches run at the same time.
#[derive(Default)]
struct CountingFetcher {
    counters: Arc<Concurrency>,
}

impl Fetcher for CountingFetcher {
    async fn fetch(&self, _url: &str, _cancel: CancellationToken) -> Result<String, FetchError> {
        let now = self.counters.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.counters.current.fetch_sub(1, Ordering::SeqCst);
        Ok(PAGE.to_string())
    }
}

/// Answers immediately, so only the admission delay spaces out the jobs.
struct InstantFetcher;

impl Fetcher for InstantFetcher {
    async fn fetch(&self, _url: &str, _cancel: CancellationToken) -> Result<String, FetchError> {
        Ok(PAGE.to_string())
    }
}

/// Holds every fetch until the test releases a permit. Ignores cancellation,
/// like a request that is already past the point of no return.
struct GatedFetcher {
    gate: Arc<Semaphore>,
}

impl Fetcher for GatedFetcher {
    async fn fetch(&self, _url: &str, _cancel: CancellationToken) -> Result<String, FetchError> {
        let permit = self.gate.acquire().await.map_err(|_| FetchError::Cancelled)?;
        permit.forget();
        Ok(PAGE.to_string())
    }
}

#[tokio::test]
async fn test_in_flight_jobs_never_exceed_concurrency() {
    let counters = Arc::new(Concurrency::default());
    let fetcher = CountingFetcher {
        counters: Arc::clone(&counters),
    };
    let controller = BatchController::new(fetcher, config(2));
    let mut run = controller.start(urls(4)).expect("batch should start");

    while let Some(snapshot) = run.next_snapshot().await {
        assert!(snapshot.count(JobStatus::Analyzing) <= 2);
    }
    let state = run.wait().await.expect("scheduler should not panic");

    assert_eq!(state.completed_jobs + state.failed_jobs, 4);
    assert_eq!(state.completed_jobs, 4);
    assert!(counters.peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(controller.stats().total_headings, 8);
}

#[tokio::test]
async fn test_admissions_are_spaced_by_the_admission_delay() {
    let delay = Duration::from_millis(100);
    let controller = BatchController::new(
        InstantFetcher,
        BatchConfig {
            max_concurrency: 4,
            admission_delay: delay,
            job_timeout: Duration::from_secs(10),
        },
    );
    assert_eq!(controller.config().admission_delay, delay);

    let start = tokio::time::Instant::now();
    let run = controller.start(urls(4)).expect("batch should start");
    let state = run.wait().await.expect("scheduler should not panic");

    assert_eq!(state.completed_jobs, 4);
    assert!(state.jobs.iter().all(|job| job.status.is_terminal()));
    // Three gaps between four admissions
    assert!(start.elapsed() >= delay * 3);

    let started: Vec<i64> = state
        .jobs
        .iter()
        .map(|job| job.started_at.expect("every job was admitted"))
        .collect();
    for pair in started.windows(2) {
        // Wall-clock millis are truncated, allow one millisecond of slack
        assert!(
            pair[1] - pair[0] >= 99,
            "jobs admitted {}ms apart",
            pair[1] - pair[0]
        );
    }
}

#[tokio::test]
async fn test_pause_resume_and_cancel() {
    let gate = Arc::new(Semaphore::new(0));
    let controller = BatchController::new(
        GatedFetcher {
            gate: Arc::clone(&gate),
        },
        config(2),
    );
    let mut updates = controller.subscribe();
    let run = controller.start(urls(5)).expect("batch should start");

    wait_until(&mut updates, |s| s.count(JobStatus::Analyzing) == 2).await;
    assert!(controller.pause());
    assert!(!controller.pause(), "pausing twice is a no-op");
    assert_eq!(controller.snapshot().mode(), BatchMode::Paused);

    // In-flight jobs finish while paused, but nothing new is admitted.
    gate.add_permits(2);
    wait_until(&mut updates, |s| s.settled_jobs() == 2).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let paused = controller.snapshot();
    assert_eq!(paused.count(JobStatus::Analyzing), 0);
    assert_eq!(paused.count(JobStatus::Pending), 3);

    assert!(controller.resume());
    wait_until(&mut updates, |s| s.count(JobStatus::Analyzing) == 2).await;
    assert_eq!(controller.snapshot().count(JobStatus::Pending), 1);

    // Cancel stops admissions; the two analyzing jobs still settle.
    assert!(controller.cancel());
    assert!(!controller.resume(), "a cancelled batch cannot resume");
    gate.add_permits(2);
    let state = run.wait().await.expect("scheduler should not panic");

    assert_eq!(state.mode(), BatchMode::Cancelled);
    assert_eq!(state.completed_jobs, 4);
    assert_eq!(state.failed_jobs, 0);
    assert_eq!(state.count(JobStatus::Pending), 1);
    assert!(state.jobs[4].started_at.is_none());
    assert!(!state.jobs[4].status.is_terminal());
}

#[tokio::test]
async fn test_controller_can_run_another_batch_after_finishing() {
    let controller = BatchController::new(CountingFetcher::default(), config(3));

    let first = controller.start(urls(2)).expect("first batch should start");
    let first = first.wait().await.expect("scheduler should not panic");

    let second = controller.start(urls(3)).expect("second batch should start");
    let second = second.wait().await.expect("scheduler should not panic");

    assert_eq!(first.total_jobs, 2);
    assert_eq!(second.total_jobs, 3);
    assert_eq!(second.completed_jobs, 3);
    assert_eq!(controller.snapshot(), second);
}
