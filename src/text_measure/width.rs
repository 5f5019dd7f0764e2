//! Core width calculation for terminal text.
//!
//! Measures the display width of characters, grapheme clusters, and strings
//! in terminal cells. Input is visible text: strip markup first.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Display width of a single Unicode codepoint in terminal cells.
///
/// - `0` for control characters, combining marks, zero-width characters
/// - `1` for normal-width characters (ASCII, Latin, Cyrillic, etc.)
/// - `2` for wide characters (CJK ideographs, fullwidth forms, emoji)
#[inline]
pub fn char_width(c: char) -> usize {
    match c as u32 {
        // Misc symbols and dingbats render wide in most terminals
        0x2600..=0x27BF => 2,
        // Pictographs, emoticons, transport
        0x1F300..=0x1F6FF => 2,
        // Supplemental and extended-A pictographs
        0x1F900..=0x1F9FF | 0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of a grapheme cluster in terminal cells.
///
/// Emoji sequences (ZWJ, VS16, skin tone, keycap) and flag pairs are 2;
/// a base plus combining marks is the base's width.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    // Regional indicator pair
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    let emoji_sequence = chars.any(|c| {
        matches!(c as u32, 0x200D | 0xFE0F | 0x1F3FB..=0x1F3FF | 0x20E3)
    });
    if emoji_sequence {
        return 2;
    }

    first.width().unwrap_or(0)
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|&b| (0x20..0x7F).contains(&b)).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_width_ascii_and_control() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width(' '), 1);
        assert_eq!(char_width('\t'), 0);
        assert_eq!(char_width('\x7F'), 0);
    }

    #[test]
    fn char_width_wide() {
        assert_eq!(char_width('你'), 2);
        assert_eq!(char_width('Ａ'), 2);
        assert_eq!(char_width('🚀'), 2);
    }

    #[test]
    fn char_width_ellipsis() {
        assert_eq!(char_width('…'), 1);
    }

    #[test]
    fn grapheme_widths() {
        assert_eq!(grapheme_width(""), 0);
        assert_eq!(grapheme_width("e\u{0301}"), 1);
        assert_eq!(grapheme_width("👨\u{200D}👩\u{200D}👧"), 2);
        assert_eq!(grapheme_width("🇺🇸"), 2);
        assert_eq!(grapheme_width("1\u{FE0F}\u{20E3}"), 2);
    }

    #[test]
    fn string_widths() {
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width("a\tb"), 2);
        assert_eq!(string_width("hi你好"), 6);
        assert_eq!(string_width("cafe\u{0301}"), 4);
        assert_eq!(string_width("The quick…"), 10);
    }
}
