//! Bounded-concurrency batch scheduler.
//!
//! One scheduler task per batch owns the FIFO queue and the in-flight set.
//! Each admitted job runs as its own tokio task ("fetch, then analyze") under
//! a timeout. The live `BatchState` sits in a `watch` channel: the controller
//! is its only writer and every reader gets a clone or a change notification.
//!
//! Pause is advisory: it stops admissions (the scheduler parks on the pause
//! channel) but never interrupts jobs already analyzing. Cancel stops
//! admissions for good and fires the child token each in-flight fetch holds.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::state::{BatchState, JobOutcome, JobStatus};
use super::stats::BatchStats;
use crate::analysis::analyze_url_with_cancel;
use crate::config::{Config, DEFAULT_ADMISSION_DELAY_MS, DEFAULT_MAX_CONCURRENCY, JOB_PROCESSING_TIMEOUT};
use crate::error_handling::{BatchError, FailureKind, FailureStats};
use crate::fetch::Fetcher;
use crate::model::AnalysisResult;
use crate::utils::sanitize_error_message;

/// Scheduling parameters of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum number of jobs analyzing at once (0 is treated as 1)
    pub max_concurrency: usize,
    /// Minimum gap between two admissions
    pub admission_delay: Duration,
    /// Limit for one job (fetch with retries + analysis)
    pub job_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            admission_delay: Duration::from_millis(DEFAULT_ADMISSION_DELAY_MS),
            job_timeout: JOB_PROCESSING_TIMEOUT,
        }
    }
}

impl From<&Config> for BatchConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
            admission_delay: config.admission_delay(),
            job_timeout: config.job_timeout(),
        }
    }
}

struct JobFailure {
    kind: FailureKind,
    message: String,
}

type JobResult = Result<AnalysisResult, JobFailure>;

struct Inner<F> {
    fetcher: Arc<F>,
    config: BatchConfig,
    state: watch::Sender<BatchState>,
    paused: watch::Sender<bool>,
    cancel: Mutex<CancellationToken>,
    failures: Arc<FailureStats>,
}

/// Runs the analysis pipeline over many URLs with pause, resume and cancel.
///
/// Cloning is cheap and every clone controls the same batch. Only one batch
/// runs at a time; a finished (or cancelled) controller can start another.
///
/// # Examples
///
/// ```no_run
/// use heading_audit::{BatchConfig, BatchController, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(std::sync::Arc::new(reqwest::Client::new()));
/// let controller = BatchController::new(fetcher, BatchConfig::default());
/// let run = controller.start(["https://example.com", "https://example.org"])?;
/// let final_state = run.wait().await?;
/// println!("{} of {} pages analyzed", final_state.completed_jobs, final_state.total_jobs);
/// # Ok(())
/// # }
/// ```
pub struct BatchController<F: Fetcher> {
    inner: Arc<Inner<F>>,
}

impl<F: Fetcher> Clone for BatchController<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Handle to a started batch.
pub struct BatchRun {
    batch_id: String,
    updates: watch::Receiver<BatchState>,
    finished: bool,
    handle: JoinHandle<BatchState>,
}

impl BatchRun {
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Waits for the next state change and returns a snapshot of it.
    ///
    /// Changes that happen while the caller is busy are coalesced into the
    /// latest snapshot. Returns `None` after the terminal snapshot (batch no
    /// longer running) has been delivered.
    pub async fn next_snapshot(&mut self) -> Option<BatchState> {
        if self.finished {
            return None;
        }
        self.updates.changed().await.ok()?;
        let snapshot = self.updates.borrow_and_update().clone();
        self.finished = !snapshot.is_running;
        Some(snapshot)
    }

    /// Waits for the scheduler to finish and returns the final state.
    ///
    /// # Errors
    ///
    /// Returns the `JoinError` if the scheduler task itself panicked.
    pub async fn wait(self) -> Result<BatchState, JoinError> {
        self.handle.await
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl<F: Fetcher> BatchController<F> {
    pub fn new(fetcher: F, config: BatchConfig) -> Self {
        let (state, _) = watch::channel(BatchState::default());
        let (paused, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                fetcher: Arc::new(fetcher),
                config,
                state,
                paused,
                cancel: Mutex::new(CancellationToken::new()),
                failures: Arc::new(FailureStats::new()),
            }),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.inner.config
    }

    /// Creates one pending job per URL and spawns the scheduler.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// `BatchError::AlreadyRunning` while another batch is running,
    /// `BatchError::EmptyBatch` when `urls` is empty.
    pub fn start<I, S>(&self, urls: I) -> Result<BatchRun, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        // Subscribed before the state changes so the start itself is the
        // first snapshot the run reports.
        let updates = self.inner.state.subscribe();
        let cancel = CancellationToken::new();

        let mut outcome = Ok(());
        self.inner.state.send_if_modified(|state| {
            if state.is_running {
                outcome = Err(BatchError::AlreadyRunning);
                return false;
            }
            if urls.is_empty() {
                outcome = Err(BatchError::EmptyBatch);
                return false;
            }
            *state = BatchState::start(&urls, now_millis());
            *self.inner.lock_cancel() = cancel.clone();
            self.inner.paused.send_replace(false);
            true
        });
        outcome?;

        let batch_id = self.inner.state.borrow().batch_id.clone();
        log::info!(
            "Starting batch {} with {} URLs (concurrency {}, admission delay {}ms)",
            batch_id,
            urls.len(),
            self.inner.config.max_concurrency,
            self.inner.config.admission_delay.as_millis()
        );

        let handle = tokio::spawn(schedule(Arc::clone(&self.inner), cancel));
        Ok(BatchRun {
            batch_id,
            updates,
            finished: false,
            handle,
        })
    }

    /// Stops admitting new jobs. Returns whether the batch was running and
    /// not already paused.
    pub fn pause(&self) -> bool {
        self.set_paused(true)
    }

    /// Lets admissions continue after `pause`.
    pub fn resume(&self) -> bool {
        self.set_paused(false)
    }

    fn set_paused(&self, paused: bool) -> bool {
        let changed = self.inner.state.send_if_modified(|state| {
            if !state.is_running || state.is_cancelled || state.is_paused == paused {
                return false;
            }
            state.is_paused = paused;
            self.inner.paused.send_replace(paused);
            true
        });
        if changed {
            log::info!("Batch {}", if paused { "paused" } else { "resumed" });
        }
        changed
    }

    /// Stops all future admissions and signals in-flight fetches to abort.
    ///
    /// Pending jobs stay pending. Jobs already analyzing settle on their own,
    /// as completed or failed, and are recorded. Returns whether this call
    /// cancelled a running batch.
    pub fn cancel(&self) -> bool {
        let changed = self.inner.state.send_if_modified(|state| {
            if !state.is_running || state.is_cancelled {
                return false;
            }
            state.is_cancelled = true;
            state.is_paused = false;
            self.inner.lock_cancel().cancel();
            true
        });
        if changed {
            log::info!("Batch cancellation requested");
        }
        changed
    }

    pub fn snapshot(&self) -> BatchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<BatchState> {
        self.inner.state.subscribe()
    }

    pub fn stats(&self) -> BatchStats {
        BatchStats::from_state(&self.inner.state.borrow())
    }

    /// Failure counters by category since the controller was created.
    pub fn failure_stats(&self) -> Arc<FailureStats> {
        Arc::clone(&self.inner.failures)
    }
}

impl<F: Fetcher> Inner<F> {
    fn lock_cancel(&self) -> std::sync::MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the job as analyzing and returns its URL, unless the batch was
    /// paused or cancelled in the meantime.
    fn admit(&self, index: usize) -> Option<String> {
        let mut url = None;
        self.state.send_if_modified(|state| {
            if state.admit(index, now_millis()) {
                url = state.jobs.get(index).map(|job| job.url.clone());
                true
            } else {
                false
            }
        });
        url
    }

    fn settle(&self, index: usize, joined: Result<JobResult, JoinError>) {
        let outcome = match joined {
            Ok(Ok(result)) => JobOutcome::Completed(Box::new(result)),
            Ok(Err(failure)) => {
                self.failures.increment(failure.kind);
                JobOutcome::Failed(sanitize_error_message(&failure.message))
            }
            Err(join_error) => {
                self.failures.increment(FailureKind::TaskPanicked);
                JobOutcome::Failed(format!("Job task failed: {join_error}"))
            }
        };

        self.state.send_modify(|state| {
            state.settle(index, outcome, now_millis());
            if let Some(job) = state.jobs.get(index) {
                match &job.error {
                    Some(error) => log::warn!("Failed to analyze {}: {}", job.url, error),
                    None => log::debug!("Analyzed {}", job.url),
                }
            }
        });
    }

    fn finish(&self) -> BatchState {
        self.state.send_modify(|state| state.finish(now_millis()));
        let state = self.state.borrow().clone();
        log::info!(
            "Batch {} finished: {} completed, {} failed, {} not started{}",
            state.batch_id,
            state.completed_jobs,
            state.failed_jobs,
            state.total_jobs - state.settled_jobs() - state.count(JobStatus::Analyzing),
            if state.is_cancelled { " (cancelled)" } else { "" }
        );
        state
    }
}

async fn run_job<F: Fetcher>(
    fetcher: Arc<F>,
    url: String,
    cancel: CancellationToken,
    timeout: Duration,
) -> JobResult {
    match tokio::time::timeout(timeout, analyze_url_with_cancel(&*fetcher, &url, cancel)).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(error)) => Err(JobFailure {
            kind: error.kind(),
            message: error.to_string(),
        }),
        Err(_) => Err(JobFailure {
            kind: FailureKind::JobTimeout,
            message: format!("Job timed out after {}s", timeout.as_secs_f64()),
        }),
    }
}

fn spawn_job<F: Fetcher>(
    inner: &Inner<F>,
    index: usize,
    url: String,
    cancel: &CancellationToken,
) -> impl Future<Output = (usize, Result<JobResult, JoinError>)> {
    let handle = tokio::spawn(run_job(
        Arc::clone(&inner.fetcher),
        url,
        cancel.child_token(),
        inner.config.job_timeout,
    ));
    async move { (index, handle.await) }
}

/// Scheduler loop of one batch. Returns the final state.
async fn schedule<F: Fetcher>(inner: Arc<Inner<F>>, cancel: CancellationToken) -> BatchState {
    let total = inner.state.borrow().total_jobs;
    let max_concurrency = inner.config.max_concurrency.max(1);
    let mut queue: VecDeque<usize> = (0..total).collect();
    let mut in_flight = FuturesUnordered::new();
    let mut paused = inner.paused.subscribe();
    let mut next_admission = Instant::now();

    while !(queue.is_empty() && in_flight.is_empty()) {
        let is_paused = *paused.borrow_and_update();
        let can_admit = !is_paused
            && !cancel.is_cancelled()
            && !queue.is_empty()
            && in_flight.len() < max_concurrency;

        tokio::select! {
            biased;

            Some((index, joined)) = in_flight.next() => inner.settle(index, joined),

            _ = cancel.cancelled(), if !queue.is_empty() => {
                log::info!("Cancelled: {} pending jobs will not start", queue.len());
                queue.clear();
            }

            // Wakes the loop on pause/resume; the new value is read above.
            _ = paused.changed() => {}

            _ = tokio::time::sleep_until(next_admission), if can_admit => {
                if let Some(index) = queue.pop_front() {
                    match inner.admit(index) {
                        Some(url) => {
                            in_flight.push(spawn_job(&inner, index, url, &cancel));
                            next_admission = Instant::now() + inner.config.admission_delay;
                        }
                        // Paused or cancelled since `can_admit` was computed
                        None => queue.push_front(index),
                    }
                }
            }
        }
    }

    inner.finish()
}
