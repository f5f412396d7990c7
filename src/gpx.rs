//! GPX export of a planned route.

use std::fmt;
use std::string::FromUtf8Error;

use ::gpx::errors::GpxError;
use ::gpx::{Gpx, GpxVersion, Metadata, Track, TrackSegment};
use time::OffsetDateTime;

use crate::planner::{PlanResult, Stop};
use crate::traits::{Point, Waypoint};

/// Name given to the device-position stop.
pub const ORIGIN_NAME: &str = "Current position";

#[derive(Debug, Clone)]
pub struct GpxOptions {
    pub creator: String,
    pub track_name: String,
    /// Export timestamp, written to the metadata block when set.
    pub time: Option<OffsetDateTime>,
}

impl Default for GpxOptions {
    fn default() -> Self {
        Self {
            creator: "route-order".to_string(),
            track_name: "Route".to_string(),
            time: None,
        }
    }
}

#[derive(Debug)]
pub enum GpxExportError {
    Write(GpxError),
    Encoding(FromUtf8Error),
}

impl fmt::Display for GpxExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpxExportError::Write(err) => write!(f, "failed to write gpx: {}", err),
            GpxExportError::Encoding(err) => write!(f, "gpx output is not utf-8: {}", err),
        }
    }
}

impl std::error::Error for GpxExportError {}

impl From<GpxError> for GpxExportError {
    fn from(err: GpxError) -> Self {
        GpxExportError::Write(err)
    }
}

impl From<FromUtf8Error> for GpxExportError {
    fn from(err: FromUtf8Error) -> Self {
        GpxExportError::Encoding(err)
    }
}

fn track_point(location: Point, name: String, description: Option<String>) -> ::gpx::Waypoint {
    let (lat, lng) = location;
    let mut point = ::gpx::Waypoint::new(geo_types::Point::new(lng, lat));
    point.name = Some(name);
    point.description = description;
    point
}

/// Build a GPX 1.1 document with one track point per visited stop.
///
/// Points are named `"{position}. {name}"`, counted from 1; the waypoint
/// label becomes the description. Round trips repeat the first stop at the
/// end. `selection` must be the waypoint slice the plan was computed from.
pub fn build_gpx<W: Waypoint>(result: &PlanResult, selection: &[W], options: &GpxOptions) -> Gpx {
    let mut stops: Vec<(Point, String, Option<String>)> = result
        .stops()
        .filter_map(|stop| match stop {
            Stop::Origin(location) => Some((location, ORIGIN_NAME.to_string(), None)),
            Stop::Selected(idx) => selection.get(idx).map(|waypoint| {
                let label = waypoint
                    .label()
                    .filter(|label| !label.is_empty())
                    .map(str::to_string);
                (waypoint.location(), waypoint.name().to_string(), label)
            }),
        })
        .collect();

    if result.round_trip && stops.len() > 1 {
        let closing = stops[0].clone();
        stops.push(closing);
    }

    let mut segment = TrackSegment::new();
    segment.points = stops
        .into_iter()
        .enumerate()
        .map(|(position, (location, name, description))| {
            track_point(location, format!("{}. {}", position + 1, name), description)
        })
        .collect();

    let mut track = Track::new();
    track.name = Some(options.track_name.clone());
    track.segments.push(segment);

    let metadata = options.time.map(|time| Metadata {
        name: Some(options.track_name.clone()),
        time: Some(time.into()),
        ..Metadata::default()
    });

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(options.creator.clone()),
        metadata,
        tracks: vec![track],
        ..Gpx::default()
    }
}

/// Serialize a plan as GPX 1.1 XML.
pub fn to_gpx<W: Waypoint>(
    result: &PlanResult,
    selection: &[W],
    options: &GpxOptions,
) -> Result<String, GpxExportError> {
    let document = build_gpx(result, selection, options);
    let mut buffer = Vec::new();
    ::gpx::write(&document, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
