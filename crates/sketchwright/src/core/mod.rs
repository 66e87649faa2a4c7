//! Core data model for drawing documents
//!
//! Elements, the document envelope, the spec input format, and the small
//! helpers (ids, text metrics, logging) the builder and codec share.

mod document;
mod element;
mod error;
mod ids;
pub mod logging;
mod spec;
mod text;
mod types;

pub use document::*;
pub use element::*;
pub use error::*;
pub use ids::*;
pub use logging::*;
pub use spec::*;
pub use text::*;
pub use types::*;
