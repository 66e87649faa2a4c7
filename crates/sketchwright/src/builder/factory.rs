//! Per-type element constructors
//!
//! Every constructor starts from the same defaults and then applies whatever
//! the spec entry supplies, one field at a time. Fields the spec leaves out
//! are never forced.

use std::collections::HashSet;

use rand::Rng;
use serde_json::Map;
use tracing::trace;

use crate::core::{
    estimate_text_size, points_extent, Arrowhead, Element, ElementKind, ElementSpec, FrameData,
    Generator, LinearData, Point, Roundness, ShapeKind, Style, TextData, DEFAULT_FONT_SIZE,
    DEFAULT_LINE_HEIGHT,
};

/// Width used when a spec entry gives none
pub const DEFAULT_WIDTH: f64 = 100.0;
/// Height used when a spec entry gives none
pub const DEFAULT_HEIGHT: f64 = 50.0;

/// Position and size of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Spec values with the 0,0 origin and 100x50 size defaults
    pub fn from_spec(spec: &ElementSpec) -> Self {
        Self {
            x: spec.x.unwrap_or(0.0),
            y: spec.y.unwrap_or(0.0),
            width: spec.width.unwrap_or(DEFAULT_WIDTH),
            height: spec.height.unwrap_or(DEFAULT_HEIGHT),
        }
    }
}

/// Non-geometric attributes every element carries
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    pub angle: f64,
    pub style: Style,
    pub group_ids: Vec<String>,
    pub frame_id: Option<String>,
    pub roundness: Option<Roundness>,
}

impl Attributes {
    pub fn from_spec(spec: &ElementSpec) -> Self {
        Self {
            angle: spec.angle.unwrap_or(0.0),
            style: spec.style.apply(Style::default()),
            group_ids: spec.group_ids.clone().unwrap_or_default(),
            frame_id: spec.frame_id.clone(),
            roundness: spec.roundness,
        }
    }
}

/// Which of the two linear element types to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearKind {
    Arrow,
    Line,
}

/// Builds fully populated elements, drawing ids and seeds from a [`Generator`]
///
/// Every id the factory hands out or reserves is remembered, so no two
/// elements built by one factory share an id.
pub struct ElementFactory<'g, R> {
    generator: &'g mut Generator<R>,
    used_ids: HashSet<String>,
}

impl<'g, R: Rng> ElementFactory<'g, R> {
    pub fn new(generator: &'g mut Generator<R>) -> Self {
        Self {
            generator,
            used_ids: HashSet::new(),
        }
    }

    /// A fresh element id, distinct from every id used so far
    pub fn next_id(&mut self) -> String {
        loop {
            let id = self.generator.id();
            if self.used_ids.insert(id.clone()) {
                return id;
            }
            trace!(id = %id, "Generated id already in use, drawing again");
        }
    }

    /// Claim an explicit id; returns false when it is already taken
    pub fn reserve_id(&mut self, id: &str) -> bool {
        self.used_ids.insert(id.to_string())
    }

    /// Fill in the bookkeeping fields and assemble the element
    pub fn assemble(
        &mut self,
        id: String,
        kind: ElementKind,
        geometry: Geometry,
        attributes: Attributes,
    ) -> Element {
        trace!(id = %id, kind = kind.type_name(), "Assembling element");
        Element {
            id,
            kind,
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            angle: attributes.angle,
            style: attributes.style,
            group_ids: attributes.group_ids,
            frame_id: attributes.frame_id,
            roundness: attributes.roundness,
            seed: self.generator.seed(),
            version: 1,
            version_nonce: self.generator.nonce(),
            is_deleted: false,
            bound_elements: Vec::new(),
            updated: self.generator.timestamp(),
            link: None,
            locked: false,
            extra: Map::new(),
        }
    }

    /// A rectangle, ellipse or diamond without any label
    pub fn shape(&mut self, kind: ShapeKind, spec: &ElementSpec) -> Element {
        let id = self.next_id();
        self.assemble(
            id,
            ElementKind::shape(kind),
            Geometry::from_spec(spec),
            Attributes::from_spec(spec),
        )
    }

    /// A free-standing text element with the given id
    ///
    /// The size comes from the text estimate unless the spec gives one.
    pub fn text(&mut self, id: String, spec: &ElementSpec) -> Element {
        let content = spec.text.clone().unwrap_or_default();
        let font_size = spec.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        let estimate = estimate_text_size(&content, font_size);

        let geometry = Geometry {
            x: spec.x.unwrap_or(0.0),
            y: spec.y.unwrap_or(0.0),
            width: spec.width.unwrap_or(estimate.width),
            height: spec.height.unwrap_or(estimate.height),
        };
        let data = TextData {
            original_text: content.clone(),
            text: content,
            font_size,
            font_family: spec.font_family.unwrap_or_default(),
            text_align: spec.text_align.unwrap_or_default(),
            vertical_align: spec.vertical_align.unwrap_or_default(),
            container_id: None,
            auto_resize: true,
            line_height: DEFAULT_LINE_HEIGHT,
        };

        self.assemble(
            id,
            ElementKind::Text(data),
            geometry,
            Attributes::from_spec(spec),
        )
    }

    /// An arrow or line
    ///
    /// Without at least two points the element is a horizontal segment as
    /// wide as the spec's width. Width and height always equal the extent of
    /// the points.
    pub fn linear(&mut self, kind: LinearKind, spec: &ElementSpec) -> Element {
        let points = match &spec.points {
            Some(points) if points.len() >= 2 => points.clone(),
            _ => default_points(spec.width.unwrap_or(DEFAULT_WIDTH)),
        };
        let (width, height) = points_extent(&points);

        let geometry = Geometry {
            x: spec.x.unwrap_or(0.0),
            y: spec.y.unwrap_or(0.0),
            width,
            height,
        };
        let mut attributes = Attributes::from_spec(spec);
        attributes.roundness = Some(spec.roundness.unwrap_or_else(Roundness::proportional));

        let id = self.next_id();
        let element_kind = match kind {
            LinearKind::Arrow => ElementKind::Arrow(LinearData {
                points,
                last_committed_point: None,
                start_binding: spec.start_binding.clone(),
                end_binding: spec.end_binding.clone(),
                start_arrowhead: spec.start_arrowhead,
                end_arrowhead: Some(spec.end_arrowhead.unwrap_or(Arrowhead::Arrow)),
            }),
            LinearKind::Line => ElementKind::Line(LinearData {
                points,
                last_committed_point: None,
                start_binding: spec.start_binding.clone(),
                end_binding: spec.end_binding.clone(),
                start_arrowhead: None,
                end_arrowhead: None,
            }),
        };

        self.assemble(id, element_kind, geometry, attributes)
    }

    /// A frame named by `name`, else `label`, else the empty string
    pub fn frame(&mut self, spec: &ElementSpec) -> Element {
        let name = spec
            .name
            .clone()
            .or_else(|| spec.label.clone())
            .unwrap_or_default();

        let mut attributes = Attributes::from_spec(spec);
        attributes.roundness = None;

        let id = self.next_id();
        self.assemble(
            id,
            ElementKind::Frame(FrameData {
                name,
                is_collapsed: false,
            }),
            Geometry::from_spec(spec),
            attributes,
        )
    }
}

fn default_points(width: f64) -> Vec<Point> {
    vec![[0.0, 0.0], [width, 0.0]]
}
