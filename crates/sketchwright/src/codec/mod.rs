//! Document encodings
//!
//! Two on-disk forms are supported: the plain JSON document, and a markdown
//! note that embeds the document as an LZ-compressed base64 payload.

pub mod decode;
pub mod lz;
pub mod markdown;

pub use decode::{decode, decode_file, decode_with_encoding, Encoding};
pub use lz::{compress_to_base64, decompress_from_base64};
pub use markdown::{render_markdown, PAYLOAD_FENCE, WARNING_BANNER, WRAP_WIDTH};

use crate::core::{Document, Result, SketchError};

/// Serialise `document` as indented plain JSON
pub fn to_json_pretty(document: &Document) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(SketchError::serialization)
}

/// Serialise `document` as compact plain JSON
pub fn to_json(document: &Document) -> Result<String> {
    serde_json::to_string(document).map_err(SketchError::serialization)
}
