use std::path::Path;

use serde::Serialize;

use crate::encoding;
use crate::error::{ConversionError, TrackError};
use crate::extractor::{self, ExtractedRecord};
use crate::options::ConvertOptions;
use crate::parser;
use crate::utm::{self, UtmError, Zone};

/// One output row, in the same position as the record it was projected from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectedRow {
    pub easting: f64,
    pub northing: f64,
    pub elevation: Option<f64>,
    pub units: String,
    pub name: Option<String>,
}

/// Projected rows plus the zone of the last projected point.
///
/// The zone is not checked against earlier rows: a track crossing a zone
/// boundary reports only the final zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionResult {
    pub rows: Vec<ProjectedRow>,
    pub zone: Option<Zone>,
}

/// Project one record, passing elevation, units and name through.
pub fn project(record: ExtractedRecord) -> Result<(ProjectedRow, Zone), UtmError> {
    let utm = utm::from_latlon(record.lat, record.lon)?;
    let row = ProjectedRow {
        easting: utm.easting,
        northing: utm.northing,
        elevation: record.ele,
        units: record.units.to_string(),
        name: record.name,
    };
    Ok((row, utm.zone))
}

/// Read a GPX file and convert it to UTM rows.
///
/// Any failure along the way aborts the conversion; no partial rows are
/// returned.
pub fn convert(path: impl AsRef<Path>, opts: &ConvertOptions) -> Result<ConversionResult, ConversionError> {
    let path = path.as_ref();
    tracing::debug!("Opening {}.", path.display());

    let bytes = std::fs::read(path).map_err(|source| TrackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    convert_bytes(&bytes, &source_name, opts)
}

/// Convert raw GPX file contents. `source_name` labels error messages.
pub fn convert_bytes(
    bytes: &[u8],
    source_name: &str,
    opts: &ConvertOptions,
) -> Result<ConversionResult, ConversionError> {
    let text = encoding::decode(bytes, opts.encoding.as_deref())?;
    let doc = parser::parse_track(&text)?;
    let records = extractor::extract(doc, source_name)?;

    let mut result = ConversionResult {
        rows: Vec::with_capacity(records.len()),
        zone: None,
    };
    for record in records {
        let (row, zone) = project(record)?;
        result.rows.push(row);
        result.zone = Some(zone);
    }

    tracing::debug!(
        rows = result.rows.len(),
        zone = ?result.zone.map(|z| z.to_string()),
        "converted {source_name}"
    );
    Ok(result)
}
