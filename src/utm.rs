//! WGS84 latitude/longitude to UTM projection.
//!
//! Transverse Mercator with the series expansion to the sixth power of the
//! longitude offset, the same one used by most UTM converters. Zone numbers
//! follow the standard grid including the Norway and Svalbard exceptions.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

const K0: f64 = 0.9996;

const E: f64 = 0.00669438;
const E2: f64 = E * E;
const E3: f64 = E2 * E;
const E_P2: f64 = E / (1.0 - E);

const M1: f64 = 1.0 - E / 4.0 - 3.0 * E2 / 64.0 - 5.0 * E3 / 256.0;
const M2: f64 = 3.0 * E / 8.0 + 3.0 * E2 / 32.0 + 45.0 * E3 / 1024.0;
const M3: f64 = 15.0 * E2 / 256.0 + 45.0 * E3 / 1024.0;
const M4: f64 = 35.0 * E3 / 3072.0;

/// Equatorial radius in meters.
const R: f64 = 6_378_137.0;

const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const MIN_LAT: f64 = -80.0;
const MAX_LAT: f64 = 84.0;
const MIN_LON: f64 = -180.0;
const MAX_LON: f64 = 180.0;

// X covers 72..84, so it is listed twice.
const ZONE_LETTERS: &[u8; 21] = b"CDEFGHJKLMNPQRSTUVWXX";

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum UtmError {
    #[error("latitude out of range (must be between 80 deg S and 84 deg N): {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude out of range (must be between 180 deg W and 180 deg E): {0}")]
    LongitudeOutOfRange(f64),
}

/// A UTM grid zone, e.g. `15T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub number: u8,
    pub letter: char,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.letter)
    }
}

/// A projected position in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    pub easting: f64,
    pub northing: f64,
    pub zone: Zone,
}

/// Project a WGS84 position into its natural UTM zone.
pub fn from_latlon(lat: f64, lon: f64) -> Result<UtmCoordinate, UtmError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(UtmError::LatitudeOutOfRange(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(UtmError::LongitudeOutOfRange(lon));
    }

    let zone = Zone {
        number: zone_number(lat, lon),
        letter: zone_letter(lat).ok_or(UtmError::LatitudeOutOfRange(lat))?,
    };

    let lat_rad = lat.to_radians();
    let lat_sin = lat_rad.sin();
    let lat_cos = lat_rad.cos();

    let lat_tan = lat_sin / lat_cos;
    let lat_tan2 = lat_tan * lat_tan;
    let lat_tan4 = lat_tan2 * lat_tan2;

    let central_lon_rad = central_longitude(zone.number).to_radians();

    let n = R / (1.0 - E * lat_sin * lat_sin).sqrt();
    let c = E_P2 * lat_cos * lat_cos;

    let a = lat_cos * wrap_angle(lon.to_radians() - central_lon_rad);
    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let m = R
        * (M1 * lat_rad - M2 * (2.0 * lat_rad).sin() + M3 * (4.0 * lat_rad).sin()
            - M4 * (6.0 * lat_rad).sin());

    let easting = K0
        * n
        * (a + a3 / 6.0 * (1.0 - lat_tan2 + c)
            + a5 / 120.0 * (5.0 - 18.0 * lat_tan2 + lat_tan4 + 72.0 * c - 58.0 * E_P2))
        + FALSE_EASTING;

    let mut northing = K0
        * (m + n
            * lat_tan
            * (a2 / 2.0
                + a4 / 24.0 * (5.0 - lat_tan2 + 9.0 * c + 4.0 * c * c)
                + a6 / 720.0 * (61.0 - 58.0 * lat_tan2 + lat_tan4 + 600.0 * c - 330.0 * E_P2)));

    if lat < 0.0 {
        northing += FALSE_NORTHING_SOUTH;
    }

    Ok(UtmCoordinate {
        easting,
        northing,
        zone,
    })
}

/// Latitude band letter, `None` outside the UTM latitude range.
pub fn zone_letter(lat: f64) -> Option<char> {
    if (MIN_LAT..=MAX_LAT).contains(&lat) {
        let index = ((lat - MIN_LAT) as usize) >> 3;
        Some(ZONE_LETTERS[index] as char)
    } else {
        None
    }
}

/// Zone number for a position, honoring the Norway and Svalbard exceptions.
pub fn zone_number(lat: f64, lon: f64) -> u8 {
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }

    if (72.0..=84.0).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            return 31;
        } else if lon < 21.0 {
            return 33;
        } else if lon < 33.0 {
            return 35;
        } else if lon < 42.0 {
            return 37;
        }
    }

    // 180 wraps to zone 1
    let lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
    ((lon + 180.0) / 6.0) as u8 + 1
}

fn central_longitude(zone_number: u8) -> f64 {
    f64::from(zone_number - 1) * 6.0 - 180.0 + 3.0
}

fn wrap_angle(value: f64) -> f64 {
    (value + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_meridian_easting() {
        let utm = from_latlon(45.0, -93.0).unwrap();
        assert_eq!(utm.zone, Zone { number: 15, letter: 'T' });
        assert!((utm.easting - 500_000.0).abs() < 1e-6);
        assert!((utm.northing - 4_982_950.4).abs() < 1.0);
    }

    #[test]
    fn test_known_position() {
        // New York City Hall
        let utm = from_latlon(40.71435, -74.00597).unwrap();
        assert_eq!(utm.zone.to_string(), "18T");
        assert!((utm.easting - 583_960.0).abs() < 1.0);
        assert!((utm.northing - 4_507_523.0).abs() < 1.0);
    }

    #[test]
    fn test_southern_hemisphere_false_northing() {
        let utm = from_latlon(-33.8688, 151.2093).unwrap();
        assert_eq!(utm.zone.to_string(), "56H");
        assert!(utm.northing > 6_000_000.0 && utm.northing < FALSE_NORTHING_SOUTH);
    }

    #[test]
    fn test_norway_and_svalbard_exceptions() {
        assert_eq!(zone_number(60.0, 5.0), 32);
        assert_eq!(zone_number(78.0, 10.0), 33);
        assert_eq!(zone_number(78.0, 40.0), 37);
        assert_eq!(zone_letter(60.0), Some('V'));
        assert_eq!(zone_letter(78.0), Some('X'));
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(zone_letter(-80.0), Some('C'));
        assert_eq!(zone_letter(84.0), Some('X'));
        assert_eq!(zone_letter(84.5), None);
        assert_eq!(zone_number(0.0, 180.0), 1);
        assert_eq!(zone_number(0.0, -180.0), 1);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            from_latlon(95.0, 10.0),
            Err(UtmError::LatitudeOutOfRange(95.0))
        );
        assert_eq!(
            from_latlon(-81.0, 10.0),
            Err(UtmError::LatitudeOutOfRange(-81.0))
        );
        assert_eq!(
            from_latlon(10.0, 181.0),
            Err(UtmError::LongitudeOutOfRange(181.0))
        );
        assert!(from_latlon(f64::NAN, 10.0).is_err());
    }
}
