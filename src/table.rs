use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::converter::ProjectedRow;
use crate::error::TableError;
use crate::options::ConvertOptions;

pub const HEADER: [&str; 5] = ["Easting", "Northing", "Elevation", "Units", "Name"];

/// Write rows as a delimited table. Missing elevation and name become empty fields.
pub fn write_table<W: io::Write>(
    writer: W,
    rows: &[ProjectedRow],
    opts: &ConvertOptions,
) -> Result<(), TableError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(opts.delimiter_byte()?)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if opts.include_header {
        wtr.write_record(HEADER)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render rows as a delimited table in memory.
pub fn to_table_string(rows: &[ProjectedRow], opts: &ConvertOptions) -> Result<String, TableError> {
    let mut buf = Vec::new();
    write_table(&mut buf, rows, opts)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write rows to `path`, replacing any existing file.
pub fn save_table(path: &Path, rows: &[ProjectedRow], opts: &ConvertOptions) -> Result<(), TableError> {
    let file = File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(file, rows, opts)?;
    Ok(())
}

/// Output path offered for an input file: same name, `.CSV` suffix.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("CSV")
}
