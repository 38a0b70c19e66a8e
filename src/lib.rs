pub mod converter;
pub mod encoding;
pub mod error;
pub mod extractor;
pub mod gpx_types;
pub mod options;
pub mod parser;
pub mod session;
pub mod table;
pub mod utm;

use wasm_bindgen::prelude::*;

pub use crate::converter::{ConversionResult, ProjectedRow, convert, convert_bytes};
pub use crate::error::{ConversionError, ErrorKind};
pub use crate::options::ConvertOptions;
pub use crate::session::Session;

/// Convert GPX file contents to UTM rows, returned as a JS object `{ rows, zone }`.
#[wasm_bindgen(js_name = gpxToUtm)]
pub fn gpx_to_utm(bytes: &[u8], source_name: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let result = converter::convert_bytes(bytes, source_name, &opts)?;
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert GPX file contents to the delimited UTM table.
#[wasm_bindgen(js_name = gpxToUtmCsv)]
pub fn gpx_to_utm_csv(bytes: &[u8], source_name: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let result = converter::convert_bytes(bytes, source_name, &opts)?;
    table::to_table_string(&result.rows, &opts).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert GPX file contents to UTM rows, returned as a JSON string.
#[wasm_bindgen(js_name = gpxToUtmJson)]
pub fn gpx_to_utm_json(bytes: &[u8], source_name: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let result = converter::convert_bytes(bytes, source_name, &opts)?;
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<ConvertOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ConvertOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
