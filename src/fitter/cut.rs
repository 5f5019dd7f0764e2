//! Cut-point helpers for the fitting search.
//!
//! Offsets are counted in characters (Unicode scalar values), never bytes,
//! so a cut can't split a UTF-8 sequence.
//!
//! The tag check is a heuristic, not a parser: it only looks at the last `<`
//! before the cut and whether a `>` closes it.

/// Text indexed by character offset.
pub(crate) struct CharText<'a> {
    text: &'a str,
    /// Byte offset of every character, plus `text.len()` at the end.
    bounds: Vec<usize>,
}

impl<'a> CharText<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self { text, bounds }
    }

    /// Number of characters.
    pub(crate) fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first `count` characters (clamped to the whole text).
    pub(crate) fn prefix(&self, count: usize) -> &'a str {
        let end = self.bounds[count.min(self.len())];
        &self.text[..end]
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.len() {
            return None;
        }
        self.text[self.bounds[index]..].chars().next()
    }

    /// Character offset of the last `<` among the first `end` characters.
    fn last_tag_open(&self, end: usize) -> Option<usize> {
        let prefix = self.prefix(end);
        let byte = prefix.rfind('<')?;
        // `<` is ASCII, so its byte offset is always a char boundary.
        self.bounds.binary_search(&byte).ok()
    }
}

/// Move a cut out of an unterminated tag.
///
/// Returns `None` when the last `<` before `cut` is closed by a `>` (or there
/// is none). Otherwise returns the start of that tag, or for a closing tag
/// (`</`) the start of the tag before it, clamped to 0.
pub(crate) fn tag_safe_cut(text: &CharText<'_>, cut: usize) -> Option<usize> {
    let open = text.last_tag_open(cut)?;
    let inside = &text.prefix(cut)[text.bounds[open]..];
    if inside.contains('>') {
        return None;
    }

    if text.char_at(open + 1) == Some('/') {
        Some(text.last_tag_open(open.saturating_sub(1)).unwrap_or(0))
    } else {
        Some(open)
    }
}

/// Characters that separate words for `break_on_word`.
pub(crate) fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | ',' | '.' | ';')
}

/// Retreat from `from` to the end of the previous word.
///
/// Walks back over the partial word ending at `from`, then over the separator
/// run before it.
pub(crate) fn word_boundary(text: &CharText<'_>, from: usize) -> usize {
    let separator_before = |at: usize| text.char_at(at - 1).is_some_and(is_word_separator);

    let mut at = from.min(text.len());
    while at > 0 && !separator_before(at) {
        at -= 1;
    }
    while at > 0 && separator_before(at) {
        at -= 1;
    }
    at
}
