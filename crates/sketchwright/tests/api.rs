//! Integration tests for the public API

use sketchwright::prelude::*;
use sketchwright::{BoundElementKind, TextAlign, VerticalAlign, UNRECOGNIZED_FORMAT};

fn seeded() -> Generator {
    Generator::seeded(2024).with_timestamp(1_700_000_000_000)
}

fn build_json(input: &str) -> BuildOutput {
    let spec = DiagramSpec::from_json(input).unwrap();
    build_with(&spec, &mut seeded())
}

#[test]
fn test_labelled_rectangle() {
    let output = build_json(
        r#"{"elements":[{"type":"rectangle","x":100,"y":100,"width":200,"height":80,"label":"Header"}]}"#,
    );
    let elements = output.document.elements();
    assert_eq!(elements.len(), 2);

    let (shape, label) = (&elements[0], &elements[1]);
    assert_eq!(shape.type_name(), "rectangle");
    assert_eq!(label.type_name(), "text");
    assert_eq!(shape.bound_elements.len(), 1);
    assert_eq!(shape.bound_elements[0].id, label.id);
    assert_eq!(shape.bound_elements[0].kind, BoundElementKind::Text);

    let text = label.as_text().unwrap();
    assert_eq!(text.text, "Header");
    assert_eq!(text.container_id.as_deref(), Some(shape.id.as_str()));
    assert_eq!(text.text_align, TextAlign::Center);
    assert_eq!(text.vertical_align, VerticalAlign::Middle);

    // "Header" is 6 chars at 16px: 57.6 x 20
    assert!((label.width - 57.6).abs() < 1e-9);
    assert_eq!(label.height, 20.0);
    assert!((label.x - 171.2).abs() < 1e-9);
    assert_eq!(label.y, 130.0);
}

#[test]
fn test_arrow_bounding_box() {
    let output = build_json(r#"{"elements":[{"type":"arrow","points":[[0,0],[100,50]]}]}"#);
    let arrow = &output.document.elements()[0];
    assert_eq!(arrow.width, 100.0);
    assert_eq!(arrow.height, 50.0);
    assert_eq!(
        arrow.as_linear().unwrap().end_arrowhead,
        Some(sketchwright::Arrowhead::Arrow)
    );
}

#[test]
fn test_unknown_type_yields_empty_document() {
    let output = build_json(r#"{"elements":[{"type":"bogus","x":0,"y":0}]}"#);
    assert!(output.document.is_empty());
    assert_eq!(
        output.diagnostics,
        vec![Diagnostic::UnknownElementType {
            index: 0,
            element_type: "bogus".to_string()
        }]
    );
}

#[test]
fn test_unknown_type_next_to_known_type() {
    let output = build_json(r#"{"elements":[{"type":"bogus"},{"type":"diamond"}]}"#);
    let types: Vec<&str> = output
        .document
        .elements()
        .iter()
        .map(|e| e.type_name())
        .collect();
    assert_eq!(types, vec!["diamond"]);
}

#[test]
fn test_style_override_is_per_field() {
    let output = build_json(
        r##"{"elements":[{"type":"ellipse","backgroundColor":"#ffc9c9","strokeStyle":"dashed"}]}"##,
    );
    let style = &output.document.elements()[0].style;
    assert_eq!(style.background_color, "#ffc9c9");
    assert_eq!(style.stroke_color, "#1e1e1e");
    assert_eq!(style.stroke_width, 2.0);
    assert_eq!(style.opacity, 100);
}

#[test]
fn test_frame_name_fallback() {
    let output = build_json(
        r#"{"elements":[
            {"type":"frame","name":"Named","label":"ignored"},
            {"type":"frame","label":"From label"},
            {"type":"frame"}
        ]}"#,
    );
    let names: Vec<&str> = output
        .document
        .elements()
        .iter()
        .map(|e| e.as_frame().unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["Named", "From label", ""]);
}

#[test]
fn test_markdown_round_trip() {
    let output = build_json(
        r##"{"background":"#f8f9fa","elements":[
            {"type":"rectangle","x":0,"y":0,"width":200,"height":80,"label":"Header"},
            {"type":"diamond","x":300,"y":0,"label":"Decide?"},
            {"type":"arrow","x":200,"y":40,"points":[[0,0],[100,0]]},
            {"type":"line","points":[[0,0],[30,40],[60,0]]},
            {"type":"text","x":0,"y":200,"text":"Two\nlines"},
            {"type":"frame","x":-20,"y":-20,"width":400,"height":300,"name":"Flow"}
        ]}"##,
    );
    let markdown = encode_document(&output.document).unwrap();
    let (decoded, encoding) = decode_with_encoding(&markdown).unwrap();
    assert_eq!(encoding, Encoding::CompressedMarkdown);
    assert_eq!(decoded, output.document);
    assert_eq!(decoded.background(), "#f8f9fa");
}

#[test]
fn test_plain_json_round_trip() {
    let output = build_json(r#"{"elements":[{"type":"text","text":"solo"}]}"#);
    let json = to_json(&output.document).unwrap();
    assert_eq!(decode(&json).unwrap(), output.document);
}

#[test]
fn test_decode_rejects_unknown_format() {
    let err = decode("just some notes").unwrap_err();
    assert!(matches!(err, SketchError::MalformedInput { .. }));
    assert!(err.to_string().contains(UNRECOGNIZED_FORMAT));
}

#[test]
fn test_invalid_spec_json() {
    let err = build_from_json("{ elements: [").unwrap_err();
    assert!(matches!(err, SketchError::InvalidSpecJson { .. }));
}

#[test]
fn test_unknown_spec_fields_are_ignored() {
    let output = build_json(r#"{"elements":[{"type":"rectangle","colour":"red"}],"author":"me"}"#);
    assert!(output.is_clean());
    assert_eq!(output.document.len(), 1);
}
