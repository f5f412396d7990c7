//! Polyline representation of a planned route for map preview.
//!
//! Holds the tour as decoded coordinates, closed back to the first stop for
//! round trips. Encoding for a particular map widget happens at the
//! presentation boundary, not here.

use serde::{Deserialize, Serialize};

use crate::planner::PlanResult;
use crate::traits::Point;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Builds the preview path for a plan over the selection's coordinates.
    pub fn from_plan(result: &PlanResult, selection_points: &[Point]) -> Self {
        let mut points = result.ordered_points(selection_points);
        if result.round_trip && points.len() > 1 {
            points.push(points[0]);
        }
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
