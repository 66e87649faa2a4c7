//! Shapes with centered text labels
//!
//! A labelled shape is two elements: the shape, and a text element bound to
//! it. The shape lists the text in its `boundElements`; the text names the
//! shape as its `containerId`. The label is centered once, at construction.

use rand::Rng;
use tracing::debug;

use super::factory::{Attributes, ElementFactory, Geometry};
use crate::core::{
    estimate_text_size, BoundElement, Element, ElementKind, ElementSpec, ShapeKind, Style,
    TextAlign, TextData, VerticalAlign, DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT,
};

/// A shape and its optional bound label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledShape {
    pub shape: Element,
    pub label: Option<Element>,
}

impl LabelledShape {
    /// Shape first, then label
    pub fn into_elements(self) -> Vec<Element> {
        let mut elements = Vec::with_capacity(2);
        elements.push(self.shape);
        elements.extend(self.label);
        elements
    }
}

/// Top-left corner that centers a `width` x `height` box inside `container`
pub fn centered_origin(container: &Element, width: f64, height: f64) -> (f64, f64) {
    (
        container.x + (container.width - width) / 2.0,
        container.y + (container.height - height) / 2.0,
    )
}

/// Build a shape, plus a bound label when the spec carries a non-empty `label`
pub fn compose_shape<R: Rng>(
    factory: &mut ElementFactory<'_, R>,
    kind: ShapeKind,
    spec: &ElementSpec,
) -> LabelledShape {
    let mut shape = factory.shape(kind, spec);

    let content = match spec.label.as_deref() {
        Some(label) if !label.is_empty() => label,
        _ => return LabelledShape { shape, label: None },
    };

    let font_size = spec.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let size = estimate_text_size(content, font_size);
    let (x, y) = centered_origin(&shape, size.width, size.height);

    let label_id = factory.next_id();
    let label = factory.assemble(
        label_id.clone(),
        ElementKind::Text(TextData {
            text: content.to_string(),
            font_size,
            font_family: spec.font_family.unwrap_or_default(),
            text_align: TextAlign::Center,
            vertical_align: VerticalAlign::Middle,
            container_id: Some(shape.id.clone()),
            original_text: content.to_string(),
            auto_resize: false,
            line_height: DEFAULT_LINE_HEIGHT,
        }),
        Geometry {
            x,
            y,
            width: size.width,
            height: size.height,
        },
        Attributes {
            angle: shape.angle,
            style: Style::default(),
            group_ids: shape.group_ids.clone(),
            frame_id: shape.frame_id.clone(),
            roundness: None,
        },
    );

    shape.bound_elements = vec![BoundElement::text(label_id)];
    debug!(shape = %shape.id, label = %label.id, "Bound label to shape");

    LabelledShape {
        shape,
        label: Some(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoundElementKind, Generator};

    fn compose(spec: &ElementSpec) -> LabelledShape {
        let mut generator = Generator::seeded(3).with_timestamp(0);
        let mut factory = ElementFactory::new(&mut generator);
        compose_shape(&mut factory, ShapeKind::Rectangle, spec)
    }

    #[test]
    fn test_unlabelled_shape_is_alone() {
        let composed = compose(&ElementSpec::new("rectangle"));
        assert!(composed.label.is_none());
        assert_eq!(composed.into_elements().len(), 1);
    }

    #[test]
    fn test_empty_label_is_no_label() {
        let composed = compose(&ElementSpec::new("rectangle").with_label(""));
        assert!(composed.label.is_none());
        assert!(composed.shape.bound_elements.is_empty());
    }

    #[test]
    fn test_label_is_mutually_linked() {
        let spec = ElementSpec::new("rectangle")
            .at(0.0, 0.0)
            .sized(200.0, 80.0)
            .with_label("Header");
        let LabelledShape { shape, label } = compose(&spec);
        let label = label.unwrap();

        assert_eq!(shape.bound_elements.len(), 1);
        assert_eq!(shape.bound_elements[0].id, label.id);
        assert_eq!(shape.bound_elements[0].kind, BoundElementKind::Text);
        assert_eq!(label.container_id(), Some(shape.id.as_str()));
        assert_ne!(shape.id, label.id);
    }

    #[test]
    fn test_label_is_centered() {
        let spec = ElementSpec::new("rectangle")
            .at(10.0, 20.0)
            .sized(200.0, 80.0)
            .with_label("Header");
        let LabelledShape { label, .. } = compose(&spec);
        let label = label.unwrap();

        let size = estimate_text_size("Header", DEFAULT_FONT_SIZE);
        assert_eq!(label.x, 10.0 + (200.0 - size.width) / 2.0);
        assert_eq!(label.y, 20.0 + (80.0 - size.height) / 2.0);
        assert_eq!((label.width, label.height), (size.width, size.height));

        let data = label.as_text().unwrap();
        assert_eq!(data.text_align, TextAlign::Center);
        assert_eq!(data.vertical_align, VerticalAlign::Middle);
        assert!(!data.auto_resize);
    }

    #[test]
    fn test_label_uses_shape_font_size() {
        let spec = ElementSpec {
            font_size: Some(28.0),
            ..ElementSpec::new("rectangle").with_label("Big")
        };
        let label = compose(&spec).label.unwrap();
        assert_eq!(label.as_text().unwrap().font_size, 28.0);
        assert_eq!(label.height, 28.0 * 1.25);
    }

    #[test]
    fn test_label_follows_shape_grouping() {
        let spec = ElementSpec {
            group_ids: Some(vec!["g1".to_string()]),
            frame_id: Some("frame-1".to_string()),
            ..ElementSpec::new("rectangle").with_label("Grouped")
        };
        let LabelledShape { shape, label } = compose(&spec);
        let label = label.unwrap();
        assert_eq!(label.group_ids, shape.group_ids);
        assert_eq!(label.frame_id, shape.frame_id);
    }

    #[test]
    fn test_into_elements_order() {
        let composed = compose(&ElementSpec::new("rectangle").with_label("A"));
        let shape_id = composed.shape.id.clone();
        let elements = composed.into_elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, shape_id);
        assert_eq!(elements[1].type_name(), "text");
    }
}
