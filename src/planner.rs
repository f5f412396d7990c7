//! Route planner: start-mode policy over nearest-neighbor + 2-opt.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::construct::nearest_neighbor;
use crate::haversine::path_length;
use crate::traits::{Point, PositionProvider, StartMode, Waypoint};
use crate::two_opt::{TWO_OPT_MAX_ITERATIONS, two_opt};

/// Default number of start points tried in auto mode.
pub const AUTO_START_SAMPLE_LIMIT: usize = 20;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Cap on examined 2-opt edge pairs per improvement run.
    pub two_opt_max_iterations: usize,
    /// Maximum number of start points tried in auto mode. Values below 2
    /// are treated as 2, so the first and last points are always tried.
    pub auto_start_sample_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            two_opt_max_iterations: TWO_OPT_MAX_ITERATIONS,
            auto_start_sample_limit: AUTO_START_SAMPLE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A start index does not address any point.
    StartIndexOutOfRange { index: usize, len: usize },
    /// Current-position mode was requested without a position fix.
    MissingOrigin,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::StartIndexOutOfRange { index, len } => {
                write!(f, "start index {} out of range for {} points", index, len)
            }
            PlanError::MissingOrigin => write!(f, "current position is not available yet"),
        }
    }
}

impl std::error::Error for PlanError {}

/// What the caller asks for, in terms of waypoint ids.
#[derive(Debug, Clone)]
pub struct PlanRequest<Id> {
    pub mode: StartMode,
    pub fixed_start_id: Option<Id>,
    pub round_trip: bool,
}

impl<Id> PlanRequest<Id> {
    pub fn new(mode: StartMode) -> Self {
        Self {
            mode,
            fixed_start_id: None,
            round_trip: true,
        }
    }

    pub fn fixed_start(mut self, id: Id) -> Self {
        self.fixed_start_id = Some(id);
        self
    }

    pub fn round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }
}

/// Plain-data planning payload.
///
/// Owns everything it needs, so it can be moved to a background worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanJob {
    /// Selection coordinates, in selection order.
    pub points: Vec<Point>,
    pub mode: StartMode,
    /// Selection index to start from in fixed mode; `None` means unresolved.
    pub fixed_start_index: Option<usize>,
    /// Device position used in current mode.
    pub origin: Option<Point>,
    pub round_trip: bool,
}

impl PlanJob {
    /// Resolve a request against a selection.
    ///
    /// The position provider is only queried in current mode.
    pub fn from_selection<W, P>(selection: &[W], request: &PlanRequest<W::Id>, provider: &P) -> Self
    where
        W: Waypoint,
        P: PositionProvider + ?Sized,
    {
        let fixed_start_index = match request.mode {
            StartMode::Fixed => request
                .fixed_start_id
                .as_ref()
                .and_then(|id| selection.iter().position(|w| w.id() == id)),
            _ => None,
        };

        let origin = match request.mode {
            StartMode::Current => provider.current_position(),
            _ => None,
        };

        Self {
            points: selection.iter().map(|w| w.location()).collect(),
            mode: request.mode,
            fixed_start_index,
            origin,
            round_trip: request.round_trip,
        }
    }
}

/// Outcome of one planning run. Replaced wholesale by the next run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// Visiting order. Indexes the origin-prepended point array when
    /// `origin_is_current_position` is set, the selection otherwise.
    pub order: Vec<usize>,
    pub total_distance_meters: f64,
    pub origin_is_current_position: bool,
    pub origin_coordinate: Option<Point>,
    pub round_trip: bool,
    /// Fixed mode could not resolve its start and used index 0.
    pub fixed_start_fallback: bool,
}

/// A resolved element of a tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stop {
    /// The device position the tour starts from.
    Origin(Point),
    /// Index into the selection.
    Selected(usize),
}

impl PlanResult {
    fn empty(job: &PlanJob) -> Self {
        Self {
            order: Vec::new(),
            total_distance_meters: 0.0,
            origin_is_current_position: false,
            origin_coordinate: None,
            round_trip: job.round_trip,
            fixed_start_fallback: false,
        }
    }

    /// Stops in visiting order, without the round-trip closing stop.
    pub fn stops(&self) -> impl Iterator<Item = Stop> + '_ {
        self.order.iter().map(move |&idx| match self.origin_coordinate {
            Some(origin) if self.origin_is_current_position => {
                if idx == 0 {
                    Stop::Origin(origin)
                } else {
                    Stop::Selected(idx - 1)
                }
            }
            _ => Stop::Selected(idx),
        })
    }

    /// Coordinates in visiting order, resolved against the selection points.
    ///
    /// Stops that do not address a selection point are skipped.
    pub fn ordered_points(&self, selection_points: &[Point]) -> Vec<Point> {
        self.stops()
            .filter_map(|stop| match stop {
                Stop::Origin(point) => Some(point),
                Stop::Selected(idx) => selection_points.get(idx).copied(),
            })
            .collect()
    }
}

/// Candidate start indices for auto mode.
///
/// Every index when `n <= limit`; otherwise up to `limit` evenly spaced
/// indices that always include `0` and `n - 1`. Limits below 2 act as 2.
pub fn auto_start_indices(n: usize, limit: usize) -> Vec<usize> {
    let limit = limit.max(2);
    if n <= limit {
        return (0..n).collect();
    }

    let mut starts = vec![0];
    let steps = limit - 1;
    for i in 1..steps {
        let s = i * n / steps;
        if !starts.contains(&s) {
            starts.push(s);
        }
    }
    if !starts.contains(&(n - 1)) {
        starts.push(n - 1);
    }
    starts
}

/// Plan a selection of waypoints.
pub fn plan<W, P>(
    selection: &[W],
    request: &PlanRequest<W::Id>,
    provider: &P,
    config: &PlannerConfig,
) -> Result<PlanResult, PlanError>
where
    W: Waypoint,
    P: PositionProvider + ?Sized,
{
    let job = PlanJob::from_selection(selection, request, provider);
    plan_job(&job, config)
}

/// Plan a plain-data job.
pub fn plan_job(job: &PlanJob, config: &PlannerConfig) -> Result<PlanResult, PlanError> {
    if job.mode == StartMode::Current && job.origin.is_none() {
        return Err(PlanError::MissingOrigin);
    }
    if job.points.is_empty() {
        return Ok(PlanResult::empty(job));
    }

    debug!(mode = ?job.mode, points = job.points.len(), round_trip = job.round_trip, "planning route");

    match job.mode {
        StartMode::Current => {
            let origin = job.origin.ok_or(PlanError::MissingOrigin)?;
            let mut points = Vec::with_capacity(job.points.len() + 1);
            points.push(origin);
            points.extend_from_slice(&job.points);

            let (order, total) = build_from(&points, 0, job.round_trip, config)?;
            Ok(PlanResult {
                order,
                total_distance_meters: total,
                origin_is_current_position: true,
                origin_coordinate: Some(origin),
                round_trip: job.round_trip,
                fixed_start_fallback: false,
            })
        }
        StartMode::Fixed => {
            let (start, fallback) = match job.fixed_start_index {
                Some(index) => (index, false),
                None => {
                    warn!("fixed start waypoint not found in selection, starting from index 0");
                    (0, true)
                }
            };

            let (order, total) = build_from(&job.points, start, job.round_trip, config)?;
            Ok(PlanResult {
                order,
                total_distance_meters: total,
                origin_is_current_position: false,
                origin_coordinate: None,
                round_trip: job.round_trip,
                fixed_start_fallback: fallback,
            })
        }
        StartMode::Auto => {
            let starts = auto_start_indices(job.points.len(), config.auto_start_sample_limit);
            debug!(starts = starts.len(), "trying auto-mode start points");

            let candidates = starts
                .par_iter()
                .map(|&start| build_from(&job.points, start, job.round_trip, config))
                .collect::<Result<Vec<_>, _>>()?;

            let mut best: Option<(Vec<usize>, f64)> = None;
            for (order, total) in candidates {
                let better = match &best {
                    Some((_, best_total)) => total < *best_total,
                    None => true,
                };
                if better {
                    best = Some((order, total));
                }
            }

            let (order, total) = best.unwrap_or_default();
            Ok(PlanResult {
                order,
                total_distance_meters: total,
                origin_is_current_position: false,
                origin_coordinate: None,
                round_trip: job.round_trip,
                fixed_start_fallback: false,
            })
        }
    }
}

/// Construct from `start`, improve, and measure.
fn build_from(
    points: &[Point],
    start: usize,
    round_trip: bool,
    config: &PlannerConfig,
) -> Result<(Vec<usize>, f64), PlanError> {
    let initial = nearest_neighbor(points, start)?;
    let improved = two_opt(&initial, points, config.two_opt_max_iterations);
    let total = path_length(points, &improved, round_trip);
    Ok((improved, total))
}
