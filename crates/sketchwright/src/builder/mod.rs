//! Document assembly
//!
//! Walks a [`DiagramSpec`] in order and expands each entry into one element
//! (or two, for a labelled shape). Entries with an unsupported `type` are
//! skipped and reported as [`Diagnostic`]s; the rest of the build carries on.

pub mod compose;
pub mod factory;

pub use compose::{centered_origin, compose_shape, LabelledShape};
pub use factory::{
    Attributes, ElementFactory, Geometry, LinearKind, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

use rand::Rng;
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    Diagnostic, DiagramSpec, Document, Element, ElementSpec, ElementType, Generator,
    DEFAULT_BACKGROUND,
};

/// A built document together with everything that was skipped or repaired
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    /// Returns true when every spec entry was built as written
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Expands spec entries into elements, keeping ids unique
pub struct DocumentBuilder<'g, R> {
    factory: ElementFactory<'g, R>,
    elements: Vec<Element>,
    diagnostics: Vec<Diagnostic>,
}

impl<'g, R: Rng> DocumentBuilder<'g, R> {
    pub fn new(generator: &'g mut Generator<R>) -> Self {
        Self {
            factory: ElementFactory::new(generator),
            elements: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Expand one spec entry and append the result
    pub fn push(&mut self, index: usize, spec: &ElementSpec) {
        let Some(element_type) = ElementType::parse(&spec.element_type) else {
            warn!(
                index,
                element_type = %spec.element_type,
                "Unknown element type, skipping"
            );
            self.diagnostics.push(Diagnostic::UnknownElementType {
                index,
                element_type: spec.element_type.clone(),
            });
            return;
        };

        let built = match element_type {
            ElementType::Shape(kind) => {
                compose_shape(&mut self.factory, kind, spec).into_elements()
            }
            ElementType::Text => {
                let id = self.text_id(index, spec);
                vec![self.factory.text(id, spec)]
            }
            ElementType::Arrow | ElementType::Line => {
                self.check_points(index, spec);
                let kind = if element_type == ElementType::Arrow {
                    LinearKind::Arrow
                } else {
                    LinearKind::Line
                };
                vec![self.factory.linear(kind, spec)]
            }
            ElementType::Frame => vec![self.factory.frame(spec)],
        };

        for element in built {
            debug!(index, id = %element.id, kind = element.type_name(), "Built element");
            self.elements.push(element);
        }
    }

    /// Wrap the built elements in a document envelope
    pub fn finish(self, background: impl Into<String>) -> BuildOutput {
        BuildOutput {
            document: Document::new(self.elements, background),
            diagnostics: self.diagnostics,
        }
    }

    /// Explicit text ids are kept unless they are already taken
    fn text_id(&mut self, index: usize, spec: &ElementSpec) -> String {
        match spec.id.as_deref() {
            Some(id) if !id.is_empty() && self.factory.reserve_id(id) => id.to_string(),
            Some(id) if !id.is_empty() => {
                warn!(index, id, "Duplicate element id, generating a fresh one");
                self.diagnostics.push(Diagnostic::DuplicateId {
                    index,
                    id: id.to_string(),
                });
                self.factory.next_id()
            }
            _ => self.factory.next_id(),
        }
    }

    fn check_points(&mut self, index: usize, spec: &ElementSpec) {
        if let Some(points) = &spec.points {
            if points.len() < 2 {
                warn!(index, count = points.len(), "Too few points, using default segment");
                self.diagnostics.push(Diagnostic::DegeneratePoints {
                    index,
                    count: points.len(),
                });
            }
        }
    }
}

/// Build a document from `spec`, drawing ids and seeds from `generator`
pub fn build_document<R: Rng>(spec: &DiagramSpec, generator: &mut Generator<R>) -> BuildOutput {
    let build_span = span!(
        Level::INFO,
        "build_document",
        entries = spec.elements.len()
    );
    let _enter = build_span.enter();

    let mut builder = DocumentBuilder::new(generator);
    for (index, entry) in spec.elements.iter().enumerate() {
        builder.push(index, entry);
    }

    let background = spec
        .background
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
    let output = builder.finish(background);

    info!(
        elements = output.document.len(),
        diagnostics = output.diagnostics.len(),
        "Built document"
    );
    output
}
