use serde::{Deserialize, Deserializer};

use crate::error::TableError;

/// Options for GPX to UTM table conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Force a text encoding label (e.g. "windows-1252") instead of detecting one
    #[serde(default)]
    pub encoding: Option<String>,

    /// Output field delimiter (default: ',')
    #[serde(default = "default_delimiter", deserialize_with = "deserialize_delimiter")]
    pub delimiter: char,

    /// Write the Easting,Northing,Elevation,Units,Name header row (default: true)
    #[serde(default = "default_true")]
    pub include_header: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            delimiter: default_delimiter(),
            include_header: true,
        }
    }
}

impl ConvertOptions {
    /// The delimiter as a single byte. Only ASCII delimiters can be written.
    pub fn delimiter_byte(&self) -> Result<u8, TableError> {
        ascii_delimiter(self.delimiter)
    }
}

fn ascii_delimiter(delimiter: char) -> Result<u8, TableError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(TableError::InvalidDelimiter(delimiter))
    }
}

/// Parse a delimiter argument: exactly one ASCII character.
pub fn parse_delimiter(arg: &str) -> Result<char, String> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ascii_delimiter(c).map(|_| c).map_err(|e| e.to_string()),
        _ => Err(format!("delimiter must be a single character, got '{arg}'")),
    }
}

fn deserialize_delimiter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<char, D::Error> {
    let delimiter = char::deserialize(deserializer)?;
    ascii_delimiter(delimiter)
        .map(|_| delimiter)
        .map_err(serde::de::Error::custom)
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}
