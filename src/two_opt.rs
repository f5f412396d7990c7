//! 2-opt tour improvement.
//!
//! Removes two edges and reconnects the tour by reversing the segment between
//! them whenever that shortens it. The first and last positions of the route
//! never move, so the chosen start is preserved and the round-trip closing
//! edge is unaffected.
//!
//! The search is bounded by a global iteration counter. When the counter runs
//! out the best route found so far is returned, which is never worse than the
//! input.

use tracing::debug;

use crate::haversine::distance;
use crate::traits::Point;

/// Default cap on examined edge pairs across all passes.
pub const TWO_OPT_MAX_ITERATIONS: usize = 20_000;

/// Minimum gain (meters) for a swap to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// Improve `route` over `points` with 2-opt.
///
/// Routes shorter than 4 are returned unchanged.
///
/// # Panics
///
/// Panics if `route` holds an index outside `points`.
pub fn two_opt(route: &[usize], points: &[Point], max_iterations: usize) -> Vec<usize> {
    let n = route.len();
    let mut best = route.to_vec();
    if n < 4 {
        return best;
    }

    let dist = |i: usize, j: usize| distance(points[i], points[j]);
    let mut iterations = 0usize;
    let mut passes = 0usize;
    let mut improved = true;

    while improved {
        improved = false;
        passes += 1;

        for i in 1..n - 2 {
            for k in i + 1..n - 1 {
                iterations += 1;
                if iterations > max_iterations {
                    debug!(passes, max_iterations, "2-opt iteration cap reached");
                    return best;
                }

                let a = best[i - 1];
                let b = best[i];
                let c = best[k];
                let d = best[k + 1];

                let current = dist(a, b) + dist(c, d);
                let swapped = dist(a, c) + dist(b, d);
                if swapped + IMPROVEMENT_EPSILON < current {
                    best[i..=k].reverse();
                    improved = true;
                }
            }
        }
    }

    debug!(passes, iterations, "2-opt reached local optimum");
    best
}
