//! Obsidian-style `.excalidraw.md` writer
//!
//! The note carries plugin front matter, a plain listing of every text
//! element (each suffixed with a `^id` block reference), and the document
//! itself as a compressed payload inside a `compressed-json` fence.

use tracing::{debug, span, Level};

use super::lz::compress_to_base64;
use super::to_json;
use crate::core::{Document, Result};

/// Payload characters per line inside the fenced block
pub const WRAP_WIDTH: usize = 100;

/// Language tag of the fenced block holding the payload
pub const PAYLOAD_FENCE: &str = "compressed-json";

/// Banner the plugin expects right below the front matter
pub const WARNING_BANNER: &str = "==⚠  Switch to EXCALIDRAW VIEW in the MORE OPTIONS menu of this document. ⚠== You can decompress Drawing data with the command palette: 'Decompress current Excalidraw file'. For more info check in plugin settings under 'Saving'";

/// Render `document` as a markdown note
///
/// The only failure is the document failing to serialise.
pub fn render_markdown(document: &Document) -> Result<String> {
    let encode_span = span!(Level::INFO, "encode_markdown", elements = document.len());
    let _enter = encode_span.enter();

    let json = to_json(document)?;
    let payload = compress_to_base64(&json);
    debug!(
        json_len = json.len(),
        payload_len = payload.len(),
        "Compressed document"
    );

    let fence_open = format!("```{}", PAYLOAD_FENCE);
    let text_section = text_section(document);
    let wrapped = wrap(&payload, WRAP_WIDTH);

    let lines = [
        "---",
        "",
        "excalidraw-plugin: parsed",
        "tags: [excalidraw]",
        "",
        "---",
        WARNING_BANNER,
        "",
        "",
        "# Excalidraw Data",
        "",
        "## Text Elements",
        text_section.as_str(),
        "",
        "%%",
        "## Drawing",
        fence_open.as_str(),
        wrapped.as_str(),
        "```",
        "%%",
        "",
    ];
    Ok(lines.join("\n"))
}

/// One `text ^id` entry per text element, separated by blank lines
fn text_section(document: &Document) -> String {
    document
        .text_elements()
        .filter_map(|element| {
            element
                .as_text()
                .map(|text| format!("{} ^{}", text.text, element.id))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Break `payload` into lines of at most `width` chars
fn wrap(payload: &str, width: usize) -> String {
    let chars: Vec<char> = payload.chars().collect();
    chars
        .chunks(width)
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
