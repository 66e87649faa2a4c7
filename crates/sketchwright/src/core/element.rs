//! Drawing elements
//!
//! An [`Element`] holds the attributes every element shares; the
//! variant-specific part lives in [`ElementKind`], which is flattened into
//! the same JSON object and selected by its `type` tag.
//!
//! Element types this crate does not model (`freedraw`, `image`, ...) are
//! kept as [`ElementKind::Foreign`] and written back exactly as they were
//! read. Fields a modelled element carries beyond [`Element`]'s own end up
//! in [`Element::extra`] and are written back too.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::types::{
    null_as_default, Arrowhead, BoundElement, FillStyle, FontFamily, Point, PointBinding,
    Roundness, ShapeKind, StrokeStyle, TextAlign, VerticalAlign,
};

/// Default line height multiplier for text elements
pub const DEFAULT_LINE_HEIGHT: f64 = 1.25;

/// Stroke and fill attributes shared by every element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: FillStyle,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
    pub roughness: u8,
    pub opacity: u8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: "#1e1e1e".to_string(),
            background_color: "transparent".to_string(),
            fill_style: FillStyle::Solid,
            stroke_width: 2.0,
            stroke_style: StrokeStyle::Solid,
            roughness: 1,
            opacity: 100,
        }
    }
}

/// Variant-specific data, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text(TextData),
    Arrow(LinearData),
    Line(LinearData),
    Frame(FrameData),
    /// Any other element type, as its raw JSON object
    #[serde(skip)]
    Foreign(Map<String, Value>),
}

impl ElementKind {
    pub fn shape(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => ElementKind::Rectangle,
            ShapeKind::Ellipse => ElementKind::Ellipse,
            ShapeKind::Diamond => ElementKind::Diamond,
        }
    }

    /// The `type` tag written for this variant
    pub fn type_name(&self) -> &str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Diamond => "diamond",
            ElementKind::Text(_) => "text",
            ElementKind::Arrow(_) => "arrow",
            ElementKind::Line(_) => "line",
            ElementKind::Frame(_) => "frame",
            ElementKind::Foreign(raw) => raw.get("type").and_then(Value::as_str).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    pub text: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub original_text: String,
    #[serde(default = "default_auto_resize")]
    pub auto_resize: bool,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

fn default_auto_resize() -> bool {
    true
}

fn default_line_height() -> f64 {
    DEFAULT_LINE_HEIGHT
}

/// Shared data for arrows and lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearData {
    pub points: Vec<Point>,
    #[serde(default)]
    pub last_committed_point: Option<Point>,
    #[serde(default)]
    pub start_binding: Option<PointBinding>,
    #[serde(default)]
    pub end_binding: Option<PointBinding>,
    #[serde(default)]
    pub start_arrowhead: Option<Arrowhead>,
    #[serde(default)]
    pub end_arrowhead: Option<Arrowhead>,
}

/// Width and height of the bounding box around `points`
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn points_extent(points: &[Point]) -> (f64, f64) {
    let Some(first) = points.first() else {
        return (0.0, 0.0);
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first[0], first[1], first[0], first[1]);
    for [x, y] in points.iter().skip(1) {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }
    (max_x - min_x, max_y - min_y)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub is_collapsed: bool,
}

/// A single element of a drawing document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(flatten)]
    pub style: Style,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub frame_id: Option<String>,
    #[serde(default)]
    pub roundness: Option<Roundness>,
    pub seed: u32,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub version_nonce: u32,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bound_elements: Vec<BoundElement>,
    #[serde(default)]
    pub updated: i64,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub locked: bool,
    /// Fields read from a file that none of the above cover
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.kind {
            ElementKind::Foreign(raw) => raw.serialize(serializer),
            _ => Element::serialize(self, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        match Element::deserialize(Value::Object(raw.clone())) {
            Ok(mut element) => {
                element.drop_kind_fields();
                Ok(element)
            }
            Err(err) => {
                debug!(error = %err, "Keeping element as raw JSON");
                Ok(Element::foreign(raw))
            }
        }
    }
}

impl Element {
    /// Wrap a raw element object that does not match the model
    ///
    /// Only the id and geometry are read out of `raw`; serialising the
    /// element writes `raw` back unchanged.
    pub fn foreign(raw: Map<String, Value>) -> Self {
        let number = |key: &str| raw.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        let flag = |key: &str| raw.get(key).and_then(Value::as_bool).unwrap_or(false);
        Element {
            id: raw
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            x: number("x"),
            y: number("y"),
            width: number("width"),
            height: number("height"),
            angle: number("angle"),
            style: Style::default(),
            group_ids: Vec::new(),
            frame_id: None,
            roundness: None,
            seed: 0,
            version: 0,
            version_nonce: 0,
            is_deleted: flag("isDeleted"),
            bound_elements: Vec::new(),
            updated: 0,
            link: None,
            locked: flag("locked"),
            extra: Map::new(),
            kind: ElementKind::Foreign(raw),
        }
    }

    /// The flattened kind is read without consuming its keys, so they also
    /// land in `extra`
    fn drop_kind_fields(&mut self) {
        if let Ok(Value::Object(fields)) = serde_json::to_value(&self.kind) {
            for key in fields.keys() {
                self.extra.remove(key);
            }
        }
    }

    /// The `type` tag of this element
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Returns true when the element's type is not one this crate models
    pub fn is_foreign(&self) -> bool {
        matches!(self.kind, ElementKind::Foreign(_))
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_linear(&self) -> Option<&LinearData> {
        match &self.kind {
            ElementKind::Arrow(linear) | ElementKind::Line(linear) => Some(linear),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameData> {
        match &self.kind {
            ElementKind::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Returns true for rectangles, ellipses and diamonds
    pub fn is_shape(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Rectangle | ElementKind::Ellipse | ElementKind::Diamond
        )
    }

    /// Id of the container a text element is bound to, if any
    pub fn container_id(&self) -> Option<&str> {
        self.as_text().and_then(|text| text.container_id.as_deref())
    }
}
