use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;
use crate::gpx_types::*;

type Result<T> = std::result::Result<T, ParseError>;

/// Parse GPX markup into a [`TrackDocument`].
///
/// Waypoints and routes are collected; tracks and extensions are skipped.
/// A point without a valid `lat`/`lon` pair fails the whole document.
pub fn parse_track(xml: &str) -> Result<TrackDocument> {
    let mut reader = Reader::from_str(xml);
    let mut doc = TrackDocument::default();
    let mut seen_root = false;
    let mut closed_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"gpx" => seen_root = true,
                b"wpt" => doc.waypoints.push(parse_point(&e, &mut reader)?),
                b"rte" => doc.routes.push(parse_route(&mut reader)?),
                b"trk" | b"metadata" | b"extensions" => {
                    reader.read_to_end(e.name())?;
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"gpx" => {
                    seen_root = true;
                    closed_root = true;
                }
                b"wpt" => {
                    let (lat, lon) = parse_lat_lon(&e, "wpt")?;
                    doc.waypoints.push(Waypoint::new(lat, lon));
                }
                b"rte" => doc.routes.push(Route::default()),
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"gpx" => closed_root = true,
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ParseError::NotGpx);
    }
    if !closed_root {
        return Err(ParseError::UnexpectedEof {
            element: "gpx".to_string(),
        });
    }

    tracing::debug!(
        waypoints = doc.waypoints.len(),
        routes = doc.routes.len(),
        "parsed GPX document"
    );
    Ok(doc)
}

/// Parse lat/lon attributes from a point element's start tag.
fn parse_lat_lon(e: &BytesStart<'_>, element: &'static str) -> Result<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| ParseError::Xml(e.into()))?;
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        let (slot, attribute) = match attr.key.local_name().as_ref() {
            b"lat" => (&mut lat, "lat"),
            b"lon" => (&mut lon, "lon"),
            _ => continue,
        };
        *slot = Some(val.trim().parse::<f64>().map_err(|_| {
            ParseError::InvalidAttribute {
                element,
                attribute,
                value: val.to_string(),
            }
        })?);
    }

    let lat = lat.ok_or(ParseError::MissingAttribute {
        element,
        attribute: "lat",
    })?;
    let lon = lon.ok_or(ParseError::MissingAttribute {
        element,
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Parse a point element (wpt, rtept) and its children.
/// Called after receiving Event::Start for the point element.
fn parse_point<'a>(start: &BytesStart<'a>, reader: &mut Reader<&'a [u8]>) -> Result<Waypoint> {
    let element = match start.local_name().as_ref() {
        b"rtept" => "rtept",
        _ => "wpt",
    };
    let (lat, lon) = parse_lat_lon(start, element)?;

    let mut point = Waypoint::new(lat, lon);
    let end_name = start.name().0.to_vec();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"ele" => {
                    let text = reader.read_text(e.name())?;
                    point.ele = text.trim().parse::<f64>().ok();
                }
                b"name" => {
                    point.name = Some(read_text_owned(reader, &e)?);
                }
                _ => {
                    // time, desc, sym, extensions...
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => return Err(unexpected_eof(&end_name)),
            _ => {}
        }
    }

    Ok(point)
}

/// Parse a <rte> element.
fn parse_route<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Route> {
    let mut route = Route::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"name" => route.name = Some(read_text_owned(reader, &e)?),
                b"rtept" => route.points.push(parse_point(&e, reader)?.into()),
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"rtept" {
                    let (lat, lon) = parse_lat_lon(&e, "rtept")?;
                    route.points.push(Waypoint::new(lat, lon).into());
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"rte" => break,
            Event::Eof => {
                return Err(ParseError::UnexpectedEof {
                    element: "rte".to_string(),
                });
            }
            _ => {}
        }
    }

    Ok(route)
}

fn unexpected_eof(end_name: &[u8]) -> ParseError {
    ParseError::UnexpectedEof {
        element: String::from_utf8_lossy(end_name).into_owned(),
    }
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Event::CData(e) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Event::GeneralRef(e) => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    match std::str::from_utf8(e.as_ref()).unwrap_or_default() {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {}
                    }
                }
            }
            Event::End(e) if e.name().0 == end_name.as_slice() => break,
            Event::Eof => return Err(unexpected_eof(&end_name)),
            _ => {}
        }
    }

    Ok(text)
}
