//! Execution offloading for large planning jobs.
//!
//! Small jobs run on the caller's thread. Larger ones move to a dedicated
//! background thread, one per request, and report back over a channel. Any
//! worker failure falls back to computing on the caller's thread, so a
//! result is always produced.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::planner::{PlanError, PlanJob, PlanResult, PlannerConfig, plan_job};

/// Jobs with fewer points than this run synchronously.
pub const ASYNC_OFFLOAD_THRESHOLD: usize = 30;

type PlanOutcome = Result<PlanResult, PlanError>;

#[derive(Debug, Clone)]
pub struct OffloadConfig {
    /// Minimum number of points before a job is moved off-thread.
    pub threshold: usize,
    /// Whether background execution is available on this host.
    pub background: bool,
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self {
            threshold: ASYNC_OFFLOAD_THRESHOLD,
            background: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Offloader {
    config: OffloadConfig,
    planner: PlannerConfig,
}

impl Offloader {
    pub fn new(config: OffloadConfig, planner: PlannerConfig) -> Self {
        Self { config, planner }
    }

    /// Start planning `job`, in the background when it is large enough.
    pub fn submit(&self, job: PlanJob) -> PendingPlan {
        let n = job.points.len();
        if n < self.config.threshold || !self.config.background {
            return PendingPlan::ready(plan_job(&job, &self.planner));
        }

        let (sender, receiver) = mpsc::channel();
        let worker_job = job.clone();
        let worker_config = self.planner.clone();

        let spawned = thread::Builder::new()
            .name("route-planner".to_string())
            .spawn(move || {
                let outcome = plan_job(&worker_job, &worker_config);
                // The owner may have moved on; a closed channel is fine.
                let _ = sender.send(outcome);
            });

        match spawned {
            Ok(handle) => {
                info!(points = n, "planning route in background");
                PendingPlan {
                    state: PendingState::Background(BackgroundPlan {
                        job,
                        config: self.planner.clone(),
                        receiver,
                        handle: Some(handle),
                    }),
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to spawn planner thread, planning synchronously");
                PendingPlan::ready(plan_job(&job, &self.planner))
            }
        }
    }
}

/// A planning run that may still be in progress.
///
/// Dropping it abandons the background worker.
#[derive(Debug)]
pub struct PendingPlan {
    state: PendingState,
}

#[derive(Debug)]
enum PendingState {
    Ready(PlanOutcome),
    Background(BackgroundPlan),
}

#[derive(Debug)]
struct BackgroundPlan {
    job: PlanJob,
    config: PlannerConfig,
    receiver: Receiver<PlanOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundPlan {
    /// Recompute on the caller's thread after the worker went away.
    fn fallback(&mut self) -> PlanOutcome {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("planner thread panicked");
            }
        }
        warn!(points = self.job.points.len(), "background planning failed, planning synchronously");
        plan_job(&self.job, &self.config)
    }

    fn reap(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl PendingPlan {
    fn ready(outcome: PlanOutcome) -> Self {
        Self {
            state: PendingState::Ready(outcome),
        }
    }

    /// Whether the job was dispatched to a background worker.
    pub fn is_background(&self) -> bool {
        matches!(self.state, PendingState::Background(_))
    }

    /// Take the result if it is available, without blocking.
    ///
    /// Hands the pending plan back while the worker is still running.
    pub fn try_result(self) -> Result<PlanOutcome, PendingPlan> {
        match self.state {
            PendingState::Ready(outcome) => Ok(outcome),
            PendingState::Background(mut plan) => match plan.receiver.try_recv() {
                Ok(outcome) => {
                    plan.reap();
                    Ok(outcome)
                }
                Err(TryRecvError::Empty) => Err(PendingPlan {
                    state: PendingState::Background(plan),
                }),
                Err(TryRecvError::Disconnected) => Ok(plan.fallback()),
            },
        }
    }

    /// Block until the result is available.
    pub fn wait(self) -> PlanOutcome {
        match self.state {
            PendingState::Ready(outcome) => outcome,
            PendingState::Background(mut plan) => match plan.receiver.recv() {
                Ok(outcome) => {
                    plan.reap();
                    outcome
                }
                Err(_) => plan.fallback(),
            },
        }
    }
}
