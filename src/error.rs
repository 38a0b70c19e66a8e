use std::path::PathBuf;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::utm::UtmError;

/// Failures raised while reading the GPX markup itself.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("Document has no <gpx> root element")]
    NotGpx,

    #[error("Unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },
}

/// Every way a single conversion can fail, one variant per pipeline stage.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{encoding}' codec can't decode the file contents")]
    EncodingDecode { encoding: &'static str },

    #[error("No text encoding could be detected (file is empty)")]
    EncodingUndetected,

    #[error("Unknown encoding label '{label}'")]
    UnknownEncodingLabel { label: String },

    #[error(transparent)]
    TrackParse(#[from] ParseError),

    #[error("No waypoints or routes found in {source_name}.")]
    NoTrackData { source_name: String },

    #[error(transparent)]
    InvalidCoordinate(#[from] UtmError),
}

/// Failures writing the output table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Delimiter '{0}' is not an ASCII character")]
    InvalidDelimiter(char),

    #[error("Could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Coarse classification of a [`ConversionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Encoding,
    Parse,
    NoTrackData,
    InvalidCoordinate,
}

/// The single error surfaced by a conversion. Displays the underlying
/// message unchanged.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ConversionError {
    #[from]
    source: TrackError,
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match &self.source {
            TrackError::Io { .. } => ErrorKind::Io,
            TrackError::EncodingDecode { .. }
            | TrackError::EncodingUndetected
            | TrackError::UnknownEncodingLabel { .. } => ErrorKind::Encoding,
            TrackError::TrackParse(_) => ErrorKind::Parse,
            TrackError::NoTrackData { .. } => ErrorKind::NoTrackData,
            TrackError::InvalidCoordinate(_) => ErrorKind::InvalidCoordinate,
        }
    }

    pub fn inner(&self) -> &TrackError {
        &self.source
    }

    pub fn into_inner(self) -> TrackError {
        self.source
    }
}

impl From<ParseError> for ConversionError {
    fn from(e: ParseError) -> Self {
        TrackError::from(e).into()
    }
}

impl From<UtmError> for ConversionError {
    fn from(e: UtmError) -> Self {
        TrackError::from(e).into()
    }
}

impl From<ConversionError> for JsValue {
    fn from(e: ConversionError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
