use std::path::{Path, PathBuf};

use crate::converter::{self, ConversionResult};
use crate::error::ConversionError;
use crate::options::ConvertOptions;
use crate::table;

/// Selection state between choosing an input file and converting it.
#[derive(Debug, Default)]
pub struct Session {
    selected: Option<PathBuf>,
    options: ConvertOptions,
}

impl Session {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            selected: None,
            options,
        }
    }

    pub fn select(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::info!("Opening {}.", path.display());
        self.selected = Some(path);
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the selected file. `None` if nothing has been selected yet.
    pub fn convert(&self) -> Option<Result<ConversionResult, ConversionError>> {
        match &self.selected {
            Some(path) => Some(converter::convert(path, &self.options)),
            None => {
                tracing::warn!("No GPX file selected.");
                None
            }
        }
    }

    pub fn default_output_path(&self) -> Option<PathBuf> {
        self.selected.as_deref().map(table::default_output_path)
    }
}
