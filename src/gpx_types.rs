/// Parsed GPX document: the waypoints and routes of one file.
///
/// Tracks (`<trk>`) are not part of the document; the converter only ever
/// reads waypoints, falling back to the first route.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackDocument {
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<Route>,
}

impl TrackDocument {
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty() && self.routes.is_empty()
    }
}

/// A standalone GPX waypoint (`<wpt>`).
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub name: Option<String>,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
            name: None,
        }
    }
}

/// A GPX route (`<rte>`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Route {
    pub name: Option<String>,
    pub points: Vec<RoutePoint>,
}

/// A point of a route (`<rtept>`). Route points carry no elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
}

impl From<Waypoint> for RoutePoint {
    fn from(pt: Waypoint) -> Self {
        Self {
            lat: pt.lat,
            lon: pt.lon,
            name: pt.name,
        }
    }
}
