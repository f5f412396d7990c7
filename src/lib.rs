//! route-order core
//!
//! Deterministic visiting-order planning for a field worker's waypoints:
//! nearest-neighbor construction, 2-opt improvement, start-mode policies and
//! background offloading, plus the consumers that turn a plan into a map
//! preview, a GPX track and navigation links.

pub mod traits;
pub mod haversine;
pub mod construct;
pub mod two_opt;
pub mod planner;
pub mod offload;
pub mod session;
pub mod polyline;
pub mod gpx;
pub mod navigation;
