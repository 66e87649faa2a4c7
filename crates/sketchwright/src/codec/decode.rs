//! Reading documents back from either encoding

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, span, warn, Level};

use super::lz::decompress_from_base64;
use crate::core::{Document, Result, SketchError};

/// First `compressed-json` fenced block; group 1 is the payload
static PAYLOAD_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```compressed-json\r?\n([\s\S]+?)\r?\n```").expect("payload pattern is valid")
});

/// The two on-disk forms of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Markdown note with an LZ-compressed payload block
    CompressedMarkdown,
    /// The document as a plain JSON object
    PlainJson,
}

impl Encoding {
    /// Guess the encoding from content alone
    ///
    /// This only looks for the payload fence; [`decode_with_encoding`]
    /// reports which path actually produced a document.
    pub fn detect(input: &str) -> Self {
        if PAYLOAD_BLOCK_RE.is_match(input) {
            Encoding::CompressedMarkdown
        } else {
            Encoding::PlainJson
        }
    }

    /// Conventional file suffix for this encoding
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::CompressedMarkdown => ".excalidraw.md",
            Encoding::PlainJson => ".excalidraw",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::CompressedMarkdown => write!(f, "compressed markdown"),
            Encoding::PlainJson => write!(f, "plain JSON"),
        }
    }
}

/// Decode a document from either encoding
pub fn decode(input: &str) -> Result<Document> {
    decode_with_encoding(input).map(|(document, _)| document)
}

/// Decode a document and report which encoding it was read from
///
/// The compressed block is tried first. If it is missing, cannot be
/// decompressed, or does not hold a document, the whole input is parsed as
/// plain JSON, which must carry an `elements` array.
pub fn decode_with_encoding(input: &str) -> Result<(Document, Encoding)> {
    let decode_span = span!(Level::INFO, "decode_document", input_len = input.len());
    let _enter = decode_span.enter();

    if let Some(json) = compressed_payload(input) {
        match serde_json::from_str::<Document>(&json) {
            Ok(document) => {
                debug!(elements = document.len(), "Decoded compressed payload");
                return Ok((document, Encoding::CompressedMarkdown));
            }
            Err(err) => warn!(error = %err, "Compressed payload is not a document"),
        }
    }

    match serde_json::from_str::<Value>(input) {
        Ok(value) if value.get("elements").is_some_and(Value::is_array) => {
            match serde_json::from_value::<Document>(value) {
                Ok(document) => {
                    debug!(elements = document.len(), "Decoded plain JSON");
                    return Ok((document, Encoding::PlainJson));
                }
                Err(err) => warn!(error = %err, "JSON elements are not element objects"),
            }
        }
        Ok(_) => debug!("JSON has no elements array"),
        Err(err) => debug!(error = %err, "Input is not JSON"),
    }

    Err(SketchError::unrecognized_format())
}

/// Read a `.excalidraw` or `.excalidraw.md` file and decode it
///
/// # Errors
/// Returns [`SketchError::IoError`] when the file cannot be read, otherwise
/// the same errors as [`decode_with_encoding`].
pub fn decode_file(path: impl AsRef<Path>) -> Result<(Document, Encoding)> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading document file");
    let content = fs::read_to_string(path)?;
    decode_with_encoding(&content)
}

/// Decompressed text of the first payload block, if there is one and it
/// decompresses to something non-empty
fn compressed_payload(input: &str) -> Option<String> {
    let body = PAYLOAD_BLOCK_RE.captures(input)?.get(1)?.as_str();
    let packed: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    match decompress_from_base64(&packed) {
        Some(json) if !json.is_empty() => Some(json),
        _ => {
            warn!(payload_len = packed.len(), "Payload block did not decompress");
            None
        }
    }
}
