//! Sketchwright - Build Excalidraw drawings from compact JSON specs
//!
//! A library for turning a declarative list of shapes, text, arrows and
//! frames into a complete Excalidraw document, and for moving documents
//! between the plain `.excalidraw` JSON form and the Obsidian
//! `.excalidraw.md` form with its LZ-compressed payload.
//!
//! # Quick Start
//!
//! ```rust
//! use sketchwright::{build_from_json, decode, encode_document};
//!
//! let spec = r#"{"elements": [{"type": "rectangle", "x": 0, "y": 0, "label": "Header"}]}"#;
//! let output = build_from_json(spec).unwrap();
//! assert_eq!(output.document.len(), 2);
//!
//! let markdown = encode_document(&output.document).unwrap();
//! let decoded = decode(&markdown).unwrap();
//! assert_eq!(decoded, output.document);
//! ```
//!
//! # Reproducible Builds
//!
//! Ids, seeds and timestamps all come from a [`Generator`]. Pass a seeded
//! one to get the same document on every run:
//!
//! ```rust
//! use sketchwright::prelude::*;
//!
//! let spec = DiagramSpec {
//!     background: None,
//!     elements: vec![ElementSpec::new("ellipse").with_label("Start")],
//! };
//!
//! let first = build_with(&spec, &mut Generator::seeded(1).with_timestamp(0));
//! let second = build_with(&spec, &mut Generator::seeded(1).with_timestamp(0));
//! assert_eq!(first, second);
//! ```

pub mod builder;
pub mod codec;
pub mod core;

pub use builder::{build_document, BuildOutput};
pub use codec::{decode, decode_file, decode_with_encoding, Encoding};
pub use crate::core::*;

use rand::Rng;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builder::{build_document, BuildOutput, DocumentBuilder, ElementFactory};
    pub use crate::codec::{decode, decode_file, decode_with_encoding, render_markdown, Encoding};
    pub use crate::core::{
        Diagnostic, DiagramSpec, Document, Element, ElementKind, ElementSpec, Generator,
        SketchError, Style,
    };
    pub use crate::{build, build_from_json, build_with, encode, encode_document, to_json};
}

/// Build a document from `spec` with fresh random ids and the current time
///
/// Unsupported entries are skipped and listed in
/// [`BuildOutput::diagnostics`].
pub fn build(spec: &DiagramSpec) -> BuildOutput {
    build_with(spec, &mut Generator::system())
}

/// Build a document from `spec`, drawing ids and seeds from `generator`
pub fn build_with<R: Rng>(spec: &DiagramSpec, generator: &mut Generator<R>) -> BuildOutput {
    build_document(spec, generator)
}

/// Parse spec JSON and build it
///
/// # Errors
/// Returns [`SketchError::InvalidSpecJson`] when `input` is not a valid spec.
///
/// # Example
/// ```rust
/// use sketchwright::build_from_json;
///
/// let output = build_from_json(r#"{"elements": [{"type": "bogus"}]}"#).unwrap();
/// assert!(output.document.is_empty());
/// assert_eq!(output.diagnostics.len(), 1);
///
/// assert!(build_from_json("not json").is_err());
/// ```
pub fn build_from_json(input: &str) -> Result<BuildOutput> {
    let spec = DiagramSpec::from_json(input)?;
    Ok(build(&spec))
}

/// Build `spec` and render it as an `.excalidraw.md` note
pub fn encode(spec: &DiagramSpec) -> Result<String> {
    encode_document(&build(spec).document)
}

/// Render an existing document as an `.excalidraw.md` note
pub fn encode_document(document: &Document) -> Result<String> {
    codec::render_markdown(document)
}

/// Serialise a document as pretty-printed `.excalidraw` JSON
pub fn to_json(document: &Document) -> Result<String> {
    codec::to_json_pretty(document)
}
