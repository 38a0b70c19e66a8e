use crate::error::TrackError;
use crate::gpx_types::*;

/// Units code written for every record.
pub const UNITS_CODE: &str = "0";

/// One point pulled out of a track document, still in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecord {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub units: &'static str,
    pub name: Option<String>,
}

/// Pull the convertible points out of a parsed document.
///
/// Waypoints win whenever there are any; otherwise the points of the first
/// route are used and later routes are ignored. `source_name` only labels the
/// error for a document with neither.
pub fn extract(doc: TrackDocument, source_name: &str) -> Result<Vec<ExtractedRecord>, TrackError> {
    if doc.is_empty() {
        return Err(TrackError::NoTrackData {
            source_name: source_name.to_string(),
        });
    }
    let TrackDocument { waypoints, routes } = doc;

    if !waypoints.is_empty() {
        let expected = waypoints.len();
        let records: Vec<_> = waypoints.into_iter().map(from_waypoint).collect();
        warn_on_count_mismatch("waypoints", expected, records.len());
        return Ok(records);
    }

    let route = routes.into_iter().next().unwrap_or_default();
    let expected = route.points.len();
    let records: Vec<_> = route.points.into_iter().map(from_route_point).collect();
    warn_on_count_mismatch("route points", expected, records.len());
    Ok(records)
}

fn from_waypoint(pt: Waypoint) -> ExtractedRecord {
    ExtractedRecord {
        lat: pt.lat,
        lon: pt.lon,
        ele: pt.ele,
        units: UNITS_CODE,
        name: pt.name,
    }
}

fn from_route_point(pt: RoutePoint) -> ExtractedRecord {
    ExtractedRecord {
        lat: pt.lat,
        lon: pt.lon,
        ele: None,
        units: UNITS_CODE,
        name: pt.name,
    }
}

fn warn_on_count_mismatch(what: &str, expected: usize, parsed: usize) {
    if expected != parsed {
        tracing::warn!("{expected} {what} found in GPX file but {parsed} points parsed.");
    }
}
