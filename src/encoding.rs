use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::error::TrackError;

type Result<T> = std::result::Result<T, TrackError>;

/// Best-guess text encoding of raw file contents.
///
/// A byte-order mark wins; otherwise the content is sniffed. Returns `None`
/// when there is nothing to sniff.
pub fn detect_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Some(encoding);
    }
    if bytes.is_empty() {
        return None;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    Some(detector.guess(None, true))
}

/// Decode file contents to text, failing on any malformed sequence.
///
/// `label` forces a WHATWG encoding label instead of detecting one.
pub fn decode<'a>(bytes: &'a [u8], label: Option<&str>) -> Result<Cow<'a, str>> {
    let encoding = match label {
        Some(label) => Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            TrackError::UnknownEncodingLabel {
                label: label.to_string(),
            }
        })?,
        None => detect_encoding(bytes).ok_or(TrackError::EncodingUndetected)?,
    };
    tracing::debug!("Using {} encoding.", encoding.name());

    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(TrackError::EncodingDecode {
            encoding: encoding.name(),
        })
}
