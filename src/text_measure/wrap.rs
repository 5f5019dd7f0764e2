//! Character-break wrapping for terminal layout.
//!
//! Lines break at any grapheme boundary once the next grapheme would exceed
//! the width. Explicit newlines are hard breaks. Input is visible text.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, string_width};

/// Wrap text by breaking at any grapheme boundary.
///
/// Returns an empty `Vec` for empty input.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    if max_width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines: Vec<String> = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width: usize = 0;

        for grapheme in raw_line.graphemes(true) {
            let gw = grapheme_width(grapheme);

            if current_width + gw > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            current.push_str(grapheme);
            current_width += gw;
        }

        lines.push(current);
    }

    lines
}

/// Number of rows `text` occupies when wrapped to `max_width`.
///
/// Counts lines without allocating wrapped content. Returns 0 for empty text.
pub fn measure_text_height(text: &str, max_width: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    if max_width == 0 {
        return text.split('\n').count();
    }

    let mut lines: usize = 0;

    for raw_line in text.split('\n') {
        lines += 1;

        // Fast path: the whole line fits.
        if string_width(raw_line) <= max_width {
            continue;
        }

        let mut current_width: usize = 0;
        for grapheme in raw_line.graphemes(true) {
            let gw = grapheme_width(grapheme);

            if current_width + gw > max_width && current_width > 0 {
                lines += 1;
                current_width = gw;
            } else {
                current_width += gw;
            }
        }
    }

    lines
}

/// Width of the widest hard line.
pub fn max_line_width(text: &str) -> usize {
    text.split('\n').map(string_width).max().unwrap_or(0)
}
