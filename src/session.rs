//! Planning session with last-write-wins result handling.
//!
//! Every request gets a sequence number. A completed result is applied only
//! when its sequence number is higher than that of the result currently
//! shown; anything older is discarded. Once a result is applied, in-flight
//! requests issued before it are abandoned.

use tracing::debug;

use crate::offload::{Offloader, PendingPlan};
use crate::planner::{PlanError, PlanJob, PlanRequest, PlanResult};
use crate::traits::{PositionProvider, Waypoint};

/// Holds the latest applied result and its sequence number.
#[derive(Debug, Clone, Default)]
pub struct LatestPlan {
    applied: Option<u64>,
    current: Option<Result<PlanResult, PlanError>>,
}

impl LatestPlan {
    /// Apply `outcome` if `sequence` is newer than the last applied one.
    ///
    /// Returns whether the outcome was applied.
    pub fn offer(&mut self, sequence: u64, outcome: Result<PlanResult, PlanError>) -> bool {
        if self.applied.is_some_and(|applied| sequence <= applied) {
            debug!(sequence, "discarding stale plan result");
            return false;
        }
        self.applied = Some(sequence);
        self.current = Some(outcome);
        true
    }

    /// Sequence number of the applied outcome.
    pub fn sequence(&self) -> Option<u64> {
        self.applied
    }

    /// Latest applied outcome; an error means planning is not possible yet.
    pub fn current(&self) -> Option<&Result<PlanResult, PlanError>> {
        self.current.as_ref()
    }

    /// Latest applied successful result.
    pub fn result(&self) -> Option<&PlanResult> {
        self.current.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }
}

/// Single owner of planning requests for one route-building session.
#[derive(Debug, Default)]
pub struct PlanningSession {
    offloader: Offloader,
    next_sequence: u64,
    in_flight: Vec<(u64, PendingPlan)>,
    latest: LatestPlan,
}

impl PlanningSession {
    pub fn new(offloader: Offloader) -> Self {
        Self {
            offloader,
            next_sequence: 0,
            in_flight: Vec::new(),
            latest: LatestPlan::default(),
        }
    }

    /// Issue a request for `selection` and return its sequence number.
    pub fn request<W, P>(
        &mut self,
        selection: &[W],
        request: &PlanRequest<W::Id>,
        provider: &P,
    ) -> u64
    where
        W: Waypoint,
        P: PositionProvider + ?Sized,
    {
        self.submit(PlanJob::from_selection(selection, request, provider))
    }

    /// Issue a plain-data job and return its sequence number.
    pub fn submit(&mut self, job: PlanJob) -> u64 {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        let pending = self.offloader.submit(job);
        self.in_flight.push((sequence, pending));
        self.poll();
        sequence
    }

    /// Collect finished requests without blocking and apply the newest.
    pub fn poll(&mut self) -> Option<&Result<PlanResult, PlanError>> {
        let mut still_running = Vec::with_capacity(self.in_flight.len());
        for (sequence, pending) in self.in_flight.drain(..) {
            match pending.try_result() {
                Ok(outcome) => {
                    self.latest.offer(sequence, outcome);
                }
                Err(pending) => still_running.push((sequence, pending)),
            }
        }
        self.in_flight = still_running;
        self.drop_superseded();
        self.latest.current()
    }

    /// Block until every in-flight request finished, then return the latest.
    pub fn wait(&mut self) -> Option<&Result<PlanResult, PlanError>> {
        for (sequence, pending) in std::mem::take(&mut self.in_flight) {
            let outcome = pending.wait();
            self.latest.offer(sequence, outcome);
        }
        self.latest.current()
    }

    /// Whether any request is still being computed.
    pub fn is_computing(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn latest(&self) -> &LatestPlan {
        &self.latest
    }

    fn drop_superseded(&mut self) {
        if let Some(applied) = self.latest.sequence() {
            let before = self.in_flight.len();
            self.in_flight.retain(|(sequence, _)| *sequence > applied);
            let dropped = before - self.in_flight.len();
            if dropped > 0 {
                debug!(dropped, applied, "abandoned superseded planning requests");
            }
        }
    }
}
