//! Core type definitions for drawing documents
//!
//! This module contains the small value types shared by elements and specs:
//! element kinds, style enums, arrowheads, roundness and bindings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A 2-D point relative to its element's origin
pub type Point = [f64; 2];

/// The closed shape family that may carry a bound label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => write!(f, "rectangle"),
            ShapeKind::Ellipse => write!(f, "ellipse"),
            ShapeKind::Diamond => write!(f, "diamond"),
        }
    }
}

/// Element types a spec entry may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Shape(ShapeKind),
    Text,
    Arrow,
    Line,
    Frame,
}

impl ElementType {
    /// Parse the spec's `type` tag; returns `None` for anything unsupported
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rectangle" => Some(ElementType::Shape(ShapeKind::Rectangle)),
            "ellipse" => Some(ElementType::Shape(ShapeKind::Ellipse)),
            "diamond" => Some(ElementType::Shape(ShapeKind::Diamond)),
            "text" => Some(ElementType::Text),
            "arrow" => Some(ElementType::Arrow),
            "line" => Some(ElementType::Line),
            "frame" => Some(ElementType::Frame),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Shape(kind) => write!(f, "{}", kind),
            ElementType::Text => write!(f, "text"),
            ElementType::Arrow => write!(f, "arrow"),
            ElementType::Line => write!(f, "line"),
            ElementType::Frame => write!(f, "frame"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    Hachure,
    CrossHatch,
    #[default]
    Solid,
    Zigzag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Numeric font family selector
///
/// Stored as the bare number the editor expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontFamily(pub u8);

impl FontFamily {
    /// Hand-drawn font (Virgil)
    pub const HANDWRITTEN: FontFamily = FontFamily(1);
    /// Normal sans-serif (Helvetica)
    pub const NORMAL: FontFamily = FontFamily(2);
    /// Monospace (Cascadia)
    pub const CODE: FontFamily = FontFamily(3);
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::HANDWRITTEN
    }
}

/// Marker drawn at either end of an arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrowhead {
    Arrow,
    Bar,
    Dot,
    Circle,
    CircleOutline,
    Triangle,
    TriangleOutline,
    Diamond,
    DiamondOutline,
    CrowfootOne,
    CrowfootMany,
    CrowfootOneOrMany,
}

/// Corner rounding descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roundness {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Roundness {
    /// Radius proportional to element size; the default for arrows and lines
    pub const PROPORTIONAL_RADIUS: u8 = 2;

    pub fn proportional() -> Self {
        Self {
            kind: Self::PROPORTIONAL_RADIUS,
            value: None,
        }
    }
}

/// Attachment of an arrow/line end to another element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointBinding {
    pub element_id: String,
    #[serde(default)]
    pub focus: f64,
    #[serde(default)]
    pub gap: f64,
}

/// What kind of element a bound-element entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundElementKind {
    Text,
    Arrow,
}

/// Forward reference from a container to an element bound to it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BoundElementKind,
}

impl BoundElement {
    /// Entry for a bound text label
    pub fn text(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BoundElementKind::Text,
        }
    }
}

/// Deserialize `null` as the type's default value
///
/// Files written by the editor use `null` for several list fields that this
/// crate models as plain collections.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_parsing() {
        assert_eq!(
            ElementType::parse("rectangle"),
            Some(ElementType::Shape(ShapeKind::Rectangle))
        );
        assert_eq!(
            ElementType::parse("ellipse"),
            Some(ElementType::Shape(ShapeKind::Ellipse))
        );
        assert_eq!(
            ElementType::parse("diamond"),
            Some(ElementType::Shape(ShapeKind::Diamond))
        );
        assert_eq!(ElementType::parse("text"), Some(ElementType::Text));
        assert_eq!(ElementType::parse("arrow"), Some(ElementType::Arrow));
        assert_eq!(ElementType::parse("line"), Some(ElementType::Line));
        assert_eq!(ElementType::parse("frame"), Some(ElementType::Frame));
        assert_eq!(ElementType::parse("Rectangle"), None);
        assert_eq!(ElementType::parse("bogus"), None);
        assert_eq!(ElementType::parse(""), None);
    }

    #[test]
    fn test_element_type_display_round_trips() {
        for name in ["rectangle", "ellipse", "diamond", "text", "arrow", "line", "frame"] {
            let parsed = ElementType::parse(name).unwrap();
            assert_eq!(parsed.to_string(), name);
        }
    }

    #[test]
    fn test_style_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&FillStyle::CrossHatch).unwrap(),
            "\"cross-hatch\""
        );
        assert_eq!(
            serde_json::to_string(&StrokeStyle::Dashed).unwrap(),
            "\"dashed\""
        );
        assert_eq!(
            serde_json::to_string(&Arrowhead::TriangleOutline).unwrap(),
            "\"triangle_outline\""
        );
        assert_eq!(
            serde_json::to_string(&VerticalAlign::Middle).unwrap(),
            "\"middle\""
        );
    }

    #[test]
    fn test_roundness_wire_shape() {
        let json = serde_json::to_string(&Roundness::proportional()).unwrap();
        assert_eq!(json, r#"{"type":2}"#);
    }

    #[test]
    fn test_bound_element_wire_shape() {
        let json = serde_json::to_string(&BoundElement::text("abc")).unwrap();
        assert_eq!(json, r#"{"id":"abc","type":"text"}"#);
    }

    #[test]
    fn test_font_family_is_a_bare_number() {
        assert_eq!(serde_json::to_string(&FontFamily::CODE).unwrap(), "3");
        assert_eq!(FontFamily::default(), FontFamily::HANDWRITTEN);
    }
}
