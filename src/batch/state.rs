//! Batch and job state owned by the controller.

use serde::Serialize;

use crate::model::AnalysisResult;

/// Lifecycle of one job: `Pending -> Analyzing -> Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Analyzing,
    Completed,
    Failed,
}

impl JobStatus {
    /// `Completed` or `Failed`; a terminal job never changes again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Controller-level mode derived from the state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

/// One URL of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchJob {
    /// Unique within the batch (`job_<batch start millis>_<index>`)
    pub id: String,
    pub url: String,
    pub status: JobStatus,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// Unix millis when the job was admitted
    pub started_at: Option<i64>,
    /// Unix millis of the terminal transition
    pub completed_at: Option<i64>,
}

/// Snapshot of a batch.
///
/// Only the controller mutates the live state; everything handed out is a
/// clone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchState {
    pub batch_id: String,
    pub jobs: Vec<BatchJob>,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_cancelled: bool,
    pub total_jobs: usize,
    pub completed_jobs: usize,
    pub failed_jobs: usize,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
}

/// How a job ended.
#[derive(Debug)]
pub(crate) enum JobOutcome {
    Completed(Box<AnalysisResult>),
    Failed(String),
}

impl BatchState {
    /// A running batch with one pending job per URL.
    pub(crate) fn start(urls: &[String], now: i64) -> Self {
        let jobs = urls
            .iter()
            .enumerate()
            .map(|(index, url)| BatchJob {
                id: format!("job_{now}_{index}"),
                url: url.clone(),
                status: JobStatus::Pending,
                result: None,
                error: None,
                started_at: None,
                completed_at: None,
            })
            .collect();

        Self {
            batch_id: format!("batch_{now}"),
            jobs,
            is_running: true,
            is_paused: false,
            is_cancelled: false,
            total_jobs: urls.len(),
            completed_jobs: 0,
            failed_jobs: 0,
            started_at: Some(now),
            completed_at: None,
        }
    }

    pub fn mode(&self) -> BatchMode {
        if self.is_cancelled {
            BatchMode::Cancelled
        } else if self.is_running && self.is_paused {
            BatchMode::Paused
        } else if self.is_running {
            BatchMode::Running
        } else if self.completed_at.is_some() {
            BatchMode::Completed
        } else {
            BatchMode::Idle
        }
    }

    /// Looks a job up by its id.
    pub fn job(&self, id: &str) -> Option<&BatchJob> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|job| job.status == status).count()
    }

    /// Jobs that reached a terminal status.
    pub fn settled_jobs(&self) -> usize {
        self.completed_jobs + self.failed_jobs
    }

    /// Moves a pending job to `Analyzing`, unless the batch is paused or
    /// cancelled. Returns whether the job was admitted.
    pub(crate) fn admit(&mut self, index: usize, now: i64) -> bool {
        if self.is_paused || self.is_cancelled {
            return false;
        }
        match self.jobs.get_mut(index) {
            Some(job) if job.status == JobStatus::Pending => {
                job.status = JobStatus::Analyzing;
                job.started_at = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Records the terminal transition of an analyzing job together with its
    /// counter.
    pub(crate) fn settle(&mut self, index: usize, outcome: JobOutcome, now: i64) {
        let Some(job) = self.jobs.get_mut(index) else {
            return;
        };
        if job.status != JobStatus::Analyzing {
            return;
        }
        job.completed_at = Some(now);
        match outcome {
            JobOutcome::Completed(result) => {
                job.status = JobStatus::Completed;
                job.result = Some(*result);
                self.completed_jobs += 1;
            }
            JobOutcome::Failed(error) => {
                job.status = JobStatus::Failed;
                job.error = Some(error);
                self.failed_jobs += 1;
            }
        }
    }

    pub(crate) fn finish(&mut self, now: i64) {
        self.is_running = false;
        self.is_paused = false;
        self.completed_at = Some(now);
    }
}
