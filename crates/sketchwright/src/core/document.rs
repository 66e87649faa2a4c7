//! The top-level document envelope
//!
//! A [`Document`] is created once per build or decode call and never mutated
//! afterwards; the only way to change a document is to build a new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::element::Element;

/// Format tag written at the top of every document
pub const DOCUMENT_TYPE: &str = "excalidraw";
/// Schema version written by this crate
pub const SCHEMA_VERSION: u32 = 2;
/// Source identifier written by this crate
pub const DOCUMENT_SOURCE: &str = "https://excalidraw.com";
/// Canvas background used when the spec does not name one
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Canvas-level state kept alongside the elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub grid_size: Option<u32>,
    #[serde(default = "default_background")]
    pub view_background_color: String,
    /// Editor settings this crate does not interpret (`theme`, zoom, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            grid_size: None,
            view_background_color: default_background(),
            extra: Map::new(),
        }
    }
}

/// A complete drawing document
///
/// Element order is z-order and is preserved through every encoding. The
/// `files` map is always written, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type", default = "default_type")]
    kind: String,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default = "default_source")]
    source: String,
    elements: Vec<Element>,
    #[serde(default)]
    app_state: AppState,
    #[serde(default)]
    files: BTreeMap<String, Value>,
}

fn default_type() -> String {
    DOCUMENT_TYPE.to_string()
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

fn default_source() -> String {
    DOCUMENT_SOURCE.to_string()
}

impl Document {
    /// Wrap an element sequence in a fresh envelope with an empty asset map
    pub fn new(elements: Vec<Element>, background: impl Into<String>) -> Self {
        Self {
            kind: default_type(),
            version: SCHEMA_VERSION,
            source: default_source(),
            elements,
            app_state: AppState {
                view_background_color: background.into(),
                ..AppState::default()
            },
            files: BTreeMap::new(),
        }
    }

    /// Format tag (`"excalidraw"` for documents written by this crate)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Elements in z-order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Embedded files keyed by file id
    pub fn files(&self) -> &BTreeMap<String, Value> {
        &self.files
    }

    pub fn background(&self) -> &str {
        &self.app_state.view_background_color
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up an element by id
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Text elements in document order
    pub fn text_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|element| element.as_text().is_some())
    }

    /// Number of elements per `type` tag, unmodelled types included
    pub fn count_by_type(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for element in &self.elements {
            *counts.entry(element.type_name()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_shape() {
        let doc = Document::new(Vec::new(), DEFAULT_BACKGROUND);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "excalidraw",
                "version": 2,
                "source": "https://excalidraw.com",
                "elements": [],
                "appState": {
                    "gridSize": null,
                    "viewBackgroundColor": "#ffffff"
                },
                "files": {}
            })
        );
    }

    #[test]
    fn test_key_order_is_stable() {
        let doc = Document::new(Vec::new(), "#000000");
        let json = serde_json::to_string(&doc).unwrap();
        let keys = [
            "\"type\"",
            "\"version\"",
            "\"source\"",
            "\"elements\"",
            "\"appState\"",
            "\"files\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_missing_envelope_fields_default() {
        let doc: Document = serde_json::from_str(r#"{"elements": []}"#).unwrap();
        assert_eq!(doc.kind(), DOCUMENT_TYPE);
        assert_eq!(doc.version(), SCHEMA_VERSION);
        assert_eq!(doc.background(), DEFAULT_BACKGROUND);
        assert!(doc.files().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_foreign_content_survives_round_trip() {
        let input = json!({
            "type": "excalidraw",
            "version": 2,
            "source": "https://excalidraw.com",
            "elements": [
                {
                    "id": "f1", "type": "freedraw", "x": 0, "y": 0, "width": 5, "height": 5,
                    "points": [[0, 0], [5, 5]], "pressures": [], "simulatePressure": true
                },
                {
                    "id": "img", "type": "image", "x": 10, "y": 10, "width": 64, "height": 64,
                    "fileId": "abc", "status": "saved", "scale": [1, 1]
                }
            ],
            "appState": {"viewBackgroundColor": "#123456", "theme": "dark", "gridSize": 20},
            "files": {"abc": {"mimeType": "image/png", "id": "abc", "dataURL": "data:"}}
        });
        let doc: Document = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.elements().iter().all(Element::is_foreign));
        assert_eq!(doc.count_by_type().get("image"), Some(&1));
        assert_eq!(doc.app_state().grid_size, Some(20));
        assert_eq!(doc.app_state().extra["theme"], "dark");

        assert_eq!(serde_json::to_value(&doc).unwrap(), input);
    }

    #[test]
    fn test_elements_are_required() {
        let result = serde_json::from_str::<Document>(r#"{"type": "excalidraw"}"#);
        assert!(result.is_err());
    }
}
