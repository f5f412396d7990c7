//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. Concrete apps should implement them for
//! their own location records and device APIs.

use std::hash::Hash;

/// A geographic coordinate pair (lat, lng) in degrees.
pub type Point = (f64, f64);

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A named location eligible for inclusion in a route.
pub trait Waypoint {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Display name.
    fn name(&self) -> &str;

    /// Secondary label (region, center, address line).
    fn label(&self) -> Option<&str> {
        None
    }

    /// Location coordinates (lat, lng).
    fn location(&self) -> Point;
}

/// Supplies a single current-position fix on demand.
pub trait PositionProvider {
    /// Current device position (lat, lng), or `None` if no fix is available.
    fn current_position(&self) -> Option<Point>;
}

/// A provider that never has a fix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

impl PositionProvider for NoPosition {
    fn current_position(&self) -> Option<Point> {
        None
    }
}

/// A provider holding an already-obtained fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Point);

impl PositionProvider for FixedPosition {
    fn current_position(&self) -> Option<Point> {
        Some(self.0)
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn current_position(&self) -> Option<Point> {
        (**self).current_position()
    }
}

/// Start-point policy for a planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    /// Try several start points and keep the shortest tour.
    #[default]
    Auto,
    /// Start from a caller-chosen waypoint.
    Fixed,
    /// Start from the device's current position.
    Current,
}
