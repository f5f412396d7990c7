//! Hand-off to an external turn-by-turn mapping service.
//!
//! Only the request URLs are built here; opening them is up to the caller.
//! Long tours are split into sequential chunks that each stay under the
//! service's per-request waypoint limit.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::planner::PlanResult;
use crate::traits::Point;

/// Intermediate stops the mapping service accepts in one request.
pub const MAX_EXTERNAL_WAYPOINTS_PER_REQUEST: usize = 23;

#[derive(Debug, Clone)]
pub struct NavigationConfig {
    pub base_url: String,
    pub travel_mode: String,
    pub avoid_ferries: bool,
    pub max_waypoints_per_request: usize,
    /// Delay between opening consecutive chunks.
    pub stagger_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/maps".to_string(),
            travel_mode: "driving".to_string(),
            avoid_ferries: false,
            max_waypoints_per_request: MAX_EXTERNAL_WAYPOINTS_PER_REQUEST,
            stagger_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    InvalidBaseUrl(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidBaseUrl(reason) => write!(f, "invalid base url: {}", reason),
        }
    }
}

impl std::error::Error for NavigationError {}

/// One request to open, and how long after the first to open it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationLink {
    pub url: Url,
    pub delay: Duration,
}

/// Build navigation links for a plan over the selection's coordinates.
pub fn links_for_plan(
    result: &PlanResult,
    selection_points: &[Point],
    config: &NavigationConfig,
) -> Result<Vec<NavigationLink>, NavigationError> {
    directions_links(&result.ordered_points(selection_points), result.round_trip, config)
}

/// Build navigation links for stops in visiting order.
///
/// A single stop becomes a search link. Otherwise the path runs through every
/// stop and, for round trips, back to the first one. When it holds more
/// intermediate stops than the configured limit it is split into chunks, each
/// starting where the previous one ended.
pub fn directions_links(
    stops: &[Point],
    round_trip: bool,
    config: &NavigationConfig,
) -> Result<Vec<NavigationLink>, NavigationError> {
    match stops {
        [] => return Ok(Vec::new()),
        [single] => {
            let url = search_url(*single, config)?;
            return Ok(vec![NavigationLink {
                url,
                delay: Duration::ZERO,
            }]);
        }
        _ => {}
    }

    let mut path = stops.to_vec();
    if round_trip {
        path.push(stops[0]);
    }

    let last = path.len() - 1;
    let span = config.max_waypoints_per_request + 1;
    let mut links = Vec::new();
    let mut start = 0;
    while start < last {
        let end = (start + span).min(last);
        links.push(NavigationLink {
            url: directions_url(&path[start..=end], config)?,
            delay: Duration::from_millis(config.stagger_ms * links.len() as u64),
        });
        start = end;
    }

    if links.len() > 1 {
        debug!(chunks = links.len(), stops = stops.len(), "split navigation into chunks");
    }
    Ok(links)
}

fn format_point((lat, lng): Point) -> String {
    format!("{},{}", lat, lng)
}

fn base_url(config: &NavigationConfig) -> Result<Url, NavigationError> {
    let url = Url::parse(&config.base_url)
        .map_err(|err| NavigationError::InvalidBaseUrl(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(NavigationError::InvalidBaseUrl(config.base_url.clone()));
    }
    Ok(url)
}

fn directions_url(path: &[Point], config: &NavigationConfig) -> Result<Url, NavigationError> {
    let mut url = base_url(config)?;
    url.path_segments_mut()
        .map_err(|_| NavigationError::InvalidBaseUrl(config.base_url.clone()))?
        .pop_if_empty()
        .push("dir")
        .extend(path.iter().map(|point| format_point(*point)));

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("travelmode", &config.travel_mode);
        if config.avoid_ferries {
            query.append_pair("avoid", "ferries");
        }
    }
    Ok(url)
}

fn search_url(point: Point, config: &NavigationConfig) -> Result<Url, NavigationError> {
    let mut url = base_url(config)?;
    url.path_segments_mut()
        .map_err(|_| NavigationError::InvalidBaseUrl(config.base_url.clone()))?
        .pop_if_empty()
        .push("search")
        .push("");
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", &format_point(point));
    Ok(url)
}
