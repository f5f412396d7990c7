//! Nearest-neighbor tour construction.

use crate::haversine::distance;
use crate::planner::PlanError;
use crate::traits::Point;

/// Build a tour greedily from `start`, always stepping to the closest
/// unvisited point.
///
/// Ties go to the lowest index. An empty point set yields an empty tour for
/// any `start`; otherwise `start` must be in range.
pub fn nearest_neighbor(points: &[Point], start: usize) -> Result<Vec<usize>, PlanError> {
    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if start >= n {
        return Err(PlanError::StartIndexOutOfRange { index: start, len: n });
    }

    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);
    route.push(start);
    visited[start] = true;

    for _ in 1..n {
        let last = points[route[route.len() - 1]];
        let mut best: Option<usize> = None;
        let mut best_distance = f64::INFINITY;

        for (j, point) in points.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let d = distance(last, *point);
            if d < best_distance {
                best_distance = d;
                best = Some(j);
            }
        }

        // NaN distances never compare lower; take the first unvisited point.
        let next = match best {
            Some(j) => j,
            None => match visited.iter().position(|seen| !seen) {
                Some(j) => j,
                None => break,
            },
        };
        visited[next] = true;
        route.push(next);
    }

    Ok(route)
}
