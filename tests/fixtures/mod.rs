//! Test fixtures for route-order.
//!
//! Provides realistic test data including:
//! - Real Istanbul field locations (from OpenStreetMap)
//! - A `Waypoint` implementation and selection builders

pub mod istanbul_locations;

pub use istanbul_locations::*;
