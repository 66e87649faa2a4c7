//! Text size estimation
//!
//! There are no font metrics available here, so text blocks are sized with a
//! fixed per-character ratio. The editor re-measures text when it loads a
//! document; the estimate only has to be good enough to center labels.

use unicode_width::UnicodeWidthStr;

/// Font size used when a spec does not give one
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Average glyph advance as a fraction of the font size
pub const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Line advance as a fraction of the font size
pub const LINE_HEIGHT_RATIO: f64 = 1.25;

/// Estimated size of a text block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Estimate the rendered size of `text` at `font_size`.
///
/// The width is the longest line's display width in columns times
/// `font_size * 0.6`; the height is the line count times `font_size * 1.25`.
/// Wide (CJK) characters count as two columns.
///
/// # Example
/// ```
/// use sketchwright::core::estimate_text_size;
///
/// let size = estimate_text_size("Hello\nWorld!", 20.0);
/// assert_eq!(size.width, 6.0 * 20.0 * 0.6);
/// assert_eq!(size.height, 2.0 * 20.0 * 1.25);
/// ```
pub fn estimate_text_size(text: &str, font_size: f64) -> TextSize {
    let mut longest = 0;
    let mut lines = 0;
    for line in text.split('\n') {
        longest = longest.max(UnicodeWidthStr::width(line));
        lines += 1;
    }

    TextSize {
        width: longest as f64 * font_size * CHAR_WIDTH_RATIO,
        height: lines as f64 * font_size * LINE_HEIGHT_RATIO,
    }
}
