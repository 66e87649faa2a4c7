//! The compact declarative input format
//!
//! A spec lists elements with only the fields the author cares about; the
//! builder fills in everything else. Unknown fields are ignored and the
//! `type` tag is kept as a raw string so an unsupported type costs one
//! diagnostic instead of the whole parse.
//!
//! ```json
//! {
//!   "background": "#ffffff",
//!   "elements": [
//!     { "type": "rectangle", "x": 0, "y": 0, "width": 200, "height": 80, "label": "Header" },
//!     { "type": "arrow", "x": 0, "y": 100, "points": [[0, 0], [100, 50]] }
//!   ]
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::element::Style;
use super::error::SketchError;
use super::types::{
    Arrowhead, FillStyle, FontFamily, Point, PointBinding, Roundness, StrokeStyle, TextAlign,
    VerticalAlign,
};

/// A whole drawing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramSpec {
    /// Canvas background colour
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl DiagramSpec {
    /// Parse a spec from JSON text
    pub fn from_json(input: &str) -> Result<Self, SketchError> {
        serde_json::from_str(input).map_err(SketchError::invalid_spec)
    }
}

impl FromStr for DiagramSpec {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

/// One requested element; every field except `type` is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    #[serde(rename = "type", default)]
    pub element_type: String,
    /// Explicit id; honoured for text elements only
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub angle: Option<f64>,
    /// Label for shapes; fallback display name for frames
    pub label: Option<String>,
    /// Content of a text element
    pub text: Option<String>,
    /// Display name of a frame
    pub name: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<FontFamily>,
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub points: Option<Vec<Point>>,
    pub start_binding: Option<PointBinding>,
    pub end_binding: Option<PointBinding>,
    pub start_arrowhead: Option<Arrowhead>,
    pub end_arrowhead: Option<Arrowhead>,
    pub group_ids: Option<Vec<String>>,
    pub frame_id: Option<String>,
    pub roundness: Option<Roundness>,
    #[serde(flatten)]
    pub style: StyleOverrides,
}

impl ElementSpec {
    /// Start a spec entry of the given type
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = Some(points);
        self
    }
}

/// Per-element style overrides
///
/// Each field replaces the matching [`Style`] default independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides {
    pub stroke_color: Option<String>,
    pub background_color: Option<String>,
    pub fill_style: Option<FillStyle>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    pub roughness: Option<u8>,
    pub opacity: Option<u8>,
}

impl StyleOverrides {
    /// Resolve against `base`, field by field
    pub fn apply(&self, base: Style) -> Style {
        Style {
            stroke_color: self.stroke_color.clone().unwrap_or(base.stroke_color),
            background_color: self
                .background_color
                .clone()
                .unwrap_or(base.background_color),
            fill_style: self.fill_style.unwrap_or(base.fill_style),
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            stroke_style: self.stroke_style.unwrap_or(base.stroke_style),
            roughness: self.roughness.unwrap_or(base.roughness),
            opacity: self.opacity.unwrap_or(base.opacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_spec() {
        let spec = DiagramSpec::from_json(r#"{"elements": [{"type": "rectangle"}]}"#).unwrap();
        assert_eq!(spec.background, None);
        assert_eq!(spec.elements.len(), 1);
        assert_eq!(spec.elements[0].element_type, "rectangle");
        assert!(spec.elements[0].style.is_empty());
    }

    #[test]
    fn test_parse_full_entry() {
        let spec: DiagramSpec = r##"{
            "background": "#f8f9fa",
            "elements": [{
                "type": "arrow",
                "x": 10, "y": 20,
                "points": [[0, 0], [100, 50]],
                "strokeColor": "#e03131",
                "strokeStyle": "dashed",
                "opacity": 60,
                "endArrowhead": "triangle",
                "unknownField": {"ignored": true}
            }]
        }"##
        .parse()
        .unwrap();
        let entry = &spec.elements[0];
        assert_eq!(spec.background.as_deref(), Some("#f8f9fa"));
        assert_eq!(entry.x, Some(10.0));
        assert_eq!(entry.points.as_ref().unwrap().len(), 2);
        assert_eq!(entry.style.stroke_color.as_deref(), Some("#e03131"));
        assert_eq!(entry.style.stroke_style, Some(StrokeStyle::Dashed));
        assert_eq!(entry.style.opacity, Some(60));
        assert_eq!(entry.end_arrowhead, Some(Arrowhead::Triangle));
    }

    #[test]
    fn test_missing_type_is_not_a_parse_error() {
        let spec = DiagramSpec::from_json(r#"{"elements": [{"x": 1}]}"#).unwrap();
        assert_eq!(spec.elements[0].element_type, "");
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = DiagramSpec::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SketchError::InvalidSpecJson { .. }));
    }

    #[test]
    fn test_wrong_field_type_is_reported() {
        let err = DiagramSpec::from_json(r#"{"elements": [{"type": "text", "x": "left"}]}"#)
            .unwrap_err();
        assert!(matches!(err, SketchError::InvalidSpecJson { .. }));
    }

    #[test]
    fn test_overrides_apply_field_by_field() {
        let overrides = StyleOverrides {
            stroke_width: Some(4.0),
            fill_style: Some(FillStyle::Hachure),
            ..StyleOverrides::default()
        };
        let style = overrides.apply(Style::default());
        assert_eq!(style.stroke_width, 4.0);
        assert_eq!(style.fill_style, FillStyle::Hachure);
        assert_eq!(style.stroke_color, Style::default().stroke_color);
        assert_eq!(style.opacity, 100);
    }

    #[test]
    fn test_builder_helpers() {
        let entry = ElementSpec::new("rectangle")
            .at(5.0, 6.0)
            .sized(200.0, 80.0)
            .with_label("Header");
        assert_eq!(entry.x, Some(5.0));
        assert_eq!(entry.height, Some(80.0));
        assert_eq!(entry.label.as_deref(), Some("Header"));
    }
}
