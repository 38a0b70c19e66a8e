use gpx2utm::converter::{ConversionResult, convert, convert_bytes};
use gpx2utm::error::{ConversionError, ErrorKind};
use gpx2utm::options::ConvertOptions;
use gpx2utm::session::Session;
use gpx2utm::table;

fn fixture_path(path: &str) -> String {
    format!("tests/fixtures/{path}")
}

fn convert_fixture(path: &str) -> Result<ConversionResult, ConversionError> {
    convert(fixture_path(path), &ConvertOptions::default())
}

fn zone(result: &ConversionResult) -> String {
    result.zone.as_ref().unwrap().to_string()
}

fn names(result: &ConversionResult) -> Vec<Option<&str>> {
    result.rows.iter().map(|r| r.name.as_deref()).collect()
}

// ---- basic/ ----

#[test]
fn test_01_waypoints() {
    let result = convert_fixture("basic/01_waypoints.gpx").unwrap();
    assert_eq!(result.rows.len(), 2);
    assert_eq!(names(&result), vec![Some("A"), Some("B")]);

    let (a, b) = (&result.rows[0], &result.rows[1]);
    assert!(b.northing > a.northing, "northing must grow with latitude");
    assert!((a.easting - 500_000.0).abs() < 1e-6);
    assert_eq!(a.elevation, Some(300.0));
    assert_eq!(b.elevation, None);
    assert_eq!(zone(&result), "15T");

    let csv = table::to_table_string(&result.rows, &ConvertOptions::default()).unwrap();
    let second = csv.lines().nth(2).unwrap();
    assert!(second.ends_with(",,0,B"), "empty elevation field: {second}");
}

#[test]
fn test_02_first_route_only() {
    let result = convert_fixture("basic/02_routes.gpx").unwrap();
    assert_eq!(
        names(&result),
        vec![Some("L100-01"), Some("L100-02"), Some("L100-03")]
    );
    // <ele> on a route point is not carried over
    assert!(result.rows.iter().all(|r| r.elevation.is_none()));
    assert!(result.rows.iter().all(|r| r.units == "0"));
    assert_eq!(zone(&result), "10U");
}

#[test]
fn test_03_waypoints_win_over_route() {
    let result = convert_fixture("basic/03_waypoints_and_route.gpx").unwrap();
    assert_eq!(
        names(&result),
        vec![Some("STN-1"), Some("STN-2, east"), None]
    );
    assert_eq!(result.rows[0].elevation, Some(12.5));
    assert_eq!(zone(&result), "56H");
    assert!(result.rows.iter().all(|r| r.northing > 6_000_000.0));
}

// ---- edge_cases/ ----

#[test]
fn test_04_empty_names_file() {
    let err = convert_fixture("edge_cases/04_empty.gpx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoTrackData);
    assert_eq!(
        err.to_string(),
        "No waypoints or routes found in 04_empty.gpx."
    );
}

#[test]
fn test_05_tracks_only_is_no_data() {
    let err = convert_fixture("edge_cases/05_tracks_only.gpx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoTrackData);
    assert!(err.to_string().contains("05_tracks_only.gpx"));
}

#[test]
fn test_06_invalid_latitude_returns_no_rows() {
    let err = convert_fixture("edge_cases/06_invalid_latitude.gpx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCoordinate);
    assert!(err.to_string().contains("latitude out of range"));
}

#[test]
fn test_07_malformed_xml() {
    let err = convert_fixture("edge_cases/07_malformed.gpx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_07b_truncated_file() {
    let err = convert_fixture("edge_cases/07b_truncated.gpx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_truncated_route_returns_no_rows() {
    let xml = r#"<gpx><rte><rtept lat="45.0" lon="-93.0"/>"#;
    let err = convert_bytes(xml.as_bytes(), "cut.gpx", &ConvertOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("<rte>"));
}

#[test]
fn test_missing_file() {
    let err = convert_fixture("edge_cases/does_not_exist.gpx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

// ---- vendor/ ----

#[test]
fn test_08_garmin_zone_exceptions() {
    let result = convert_fixture("vendor/08_garmin_waypoints.gpx").unwrap();
    assert_eq!(names(&result), vec![Some("Bergen"), Some("Longyearbyen")]);
    assert_eq!(result.rows[0].elevation, Some(12.34));
    // Bergen lies in the widened 32V; the reported zone is the last point's
    assert_eq!(zone(&result), "33X");
}

// ---- encodings/ ----

#[test]
fn test_09_latin1_forced() {
    let opts = ConvertOptions {
        encoding: Some("iso-8859-1".to_string()),
        ..Default::default()
    };
    let result = convert(fixture_path("encodings/09_latin1.gpx"), &opts).unwrap();
    assert_eq!(
        names(&result),
        vec![Some("Genève Café"), Some("Lausanne à pied, réseau")]
    );
    assert_eq!(zone(&result), "32T");
}

#[test]
fn test_09_latin1_detected() {
    let result = convert_fixture("encodings/09_latin1.gpx").unwrap();
    assert_eq!(
        names(&result),
        vec![Some("Genève Café"), Some("Lausanne à pied, réseau")]
    );
}

#[test]
fn test_09_latin1_rejected_as_utf8() {
    let opts = ConvertOptions {
        encoding: Some("utf-8".to_string()),
        ..Default::default()
    };
    let err = convert(fixture_path("encodings/09_latin1.gpx"), &opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn test_10_utf16_bom() {
    let result = convert_fixture("encodings/10_utf16_bom.gpx").unwrap();
    assert_eq!(names(&result), vec![Some("東京タワー")]);
    assert_eq!(result.rows[0].elevation, Some(333.0));
    assert_eq!(zone(&result), "54S");
}

// ---- properties ----

#[test]
fn test_repeat_conversion_is_identical() {
    let first = convert_fixture("basic/03_waypoints_and_route.gpx").unwrap();
    let second = convert_fixture("basic/03_waypoints_and_route.gpx").unwrap();
    assert_eq!(first, second);
    for (a, b) in first.rows.iter().zip(&second.rows) {
        assert_eq!(a.easting.to_bits(), b.easting.to_bits());
        assert_eq!(a.northing.to_bits(), b.northing.to_bits());
    }
}

#[test]
fn test_row_count_matches_points() {
    let mut xml = String::from(r#"<?xml version="1.0"?><gpx version="1.1">"#);
    for i in 0..250 {
        let lat = -60.0 + i as f64 * 0.5;
        let lon = -179.0 + i as f64 * 1.4;
        xml.push_str(&format!(r#"<wpt lat="{lat}" lon="{lon}"><name>P{i}</name></wpt>"#));
    }
    xml.push_str("</gpx>");

    let result = convert_bytes(xml.as_bytes(), "grid.gpx", &ConvertOptions::default()).unwrap();
    assert_eq!(result.rows.len(), 250);
    assert_eq!(result.rows[249].name.as_deref(), Some("P249"));
}

#[test]
fn test_session_round_trip_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.gpx");
    std::fs::copy(fixture_path("basic/01_waypoints.gpx"), &input).unwrap();

    let mut session = Session::default();
    assert!(session.convert().is_none());

    session.select(&input);
    let result = session.convert().unwrap().unwrap();
    let output = session.default_output_path().unwrap();
    assert_eq!(output, dir.path().join("survey.CSV"));

    table::save_table(&output, &result.rows, session.options()).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("Easting,Northing,Elevation,Units,Name"));
    assert!(lines.next().unwrap().starts_with("500000.0,"));
    assert!(lines.next().unwrap().ends_with(",,0,B"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_failed_session_can_retry() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("late.gpx");

    let mut session = Session::default();
    session.select(&input);
    assert!(matches!(session.convert(), Some(Err(_))));

    std::fs::copy(fixture_path("basic/01_waypoints.gpx"), &input).unwrap();
    assert_eq!(session.convert().unwrap().unwrap().rows.len(), 2);
}
