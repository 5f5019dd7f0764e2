//! Terminal preview of a fitted container.
//!
//! Turns markup into styled spans, wraps them the same way the cell document
//! measures them, clips to the container when its overflow is not visible,
//! and draws the rows with crossterm.
//!
//! Only inline formatting tags are styled (`b`/`strong`, `i`/`em`, `u`,
//! `s`/`del`/`strike`); other tags are dropped and `<br>` breaks the line.

use std::io::Write;

use bitflags::bitflags;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use unicode_segmentation::UnicodeSegmentation;

use crate::document::{CellDocument, ElementId};
use crate::error::Result;
use crate::text_measure::{Token, grapheme_width, tokens};
use crate::types::{Overflow, StyleProperty};

bitflags! {
    /// Text attributes of a span.
    ///
    /// Combine with bitwise OR: `SpanAttrs::BOLD | SpanAttrs::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpanAttrs: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
    }
}

impl SpanAttrs {
    /// Attribute a formatting tag turns on; empty for other tags.
    pub fn for_tag(name: &str) -> Self {
        const TAGS: [(&str, SpanAttrs); 8] = [
            ("b", SpanAttrs::BOLD),
            ("strong", SpanAttrs::BOLD),
            ("i", SpanAttrs::ITALIC),
            ("em", SpanAttrs::ITALIC),
            ("u", SpanAttrs::UNDERLINE),
            ("s", SpanAttrs::STRIKETHROUGH),
            ("del", SpanAttrs::STRIKETHROUGH),
            ("strike", SpanAttrs::STRIKETHROUGH),
        ];
        TAGS.iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(name))
            .map(|&(_, attrs)| attrs)
            .unwrap_or_default()
    }
}

/// A run of visible text sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub attrs: SpanAttrs,
}

/// Split markup into styled spans. Line breaks become `'\n'`.
pub fn parse_spans(markup: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    // Formatting tags currently open, innermost last.
    let mut open: Vec<SpanAttrs> = Vec::new();

    let push = |spans: &mut Vec<Span>, text: &str, attrs: SpanAttrs| match spans.last_mut() {
        Some(last) if last.attrs == attrs => last.text.push_str(text),
        _ => spans.push(Span {
            text: text.to_string(),
            attrs,
        }),
    };

    for token in tokens(markup) {
        let attrs = open.iter().fold(SpanAttrs::empty(), |acc, &a| acc | a);
        match token {
            Token::Text(text) => push(&mut spans, text, attrs),
            Token::Entity(c) => push(&mut spans, c.encode_utf8(&mut [0; 4]), attrs),
            Token::Tag(tag) if tag.is_line_break() => push(&mut spans, "\n", attrs),
            Token::Tag(tag) => {
                let flag = SpanAttrs::for_tag(tag.name);
                if flag.is_empty() {
                    continue;
                }
                if !tag.closing {
                    open.push(flag);
                } else if let Some(at) = open.iter().rposition(|&a| a == flag) {
                    open.remove(at);
                }
            }
        }
    }

    spans.retain(|span| !span.text.is_empty());
    spans
}

/// Wrap spans into rows of at most `width` cells, breaking at any grapheme.
///
/// Row count matches [`measure_text_height`](crate::text_measure::measure_text_height)
/// on the same visible text.
pub fn wrap_spans(spans: &[Span], width: usize) -> Vec<Vec<Span>> {
    if spans.iter().all(|span| span.text.is_empty()) {
        return vec![];
    }

    let mut rows: Vec<Vec<Span>> = vec![Vec::new()];
    let mut row_width = 0;

    for span in spans {
        for grapheme in span.text.graphemes(true) {
            if grapheme == "\n" {
                rows.push(Vec::new());
                row_width = 0;
                continue;
            }

            let gw = grapheme_width(grapheme);
            if width > 0 && row_width + gw > width && row_width > 0 {
                rows.push(Vec::new());
                row_width = 0;
            }

            let Some(row) = rows.last_mut() else {
                continue;
            };
            match row.last_mut() {
                Some(last) if last.attrs == span.attrs => last.text.push_str(grapheme),
                _ => row.push(Span {
                    text: grapheme.to_string(),
                    attrs: span.attrs,
                }),
            }
            row_width += gw;
        }
    }

    rows
}

/// The rows a container shows, clipped to its height unless its overflow is
/// visible.
pub fn preview_rows(doc: &mut CellDocument, container: ElementId) -> Result<Vec<Vec<Span>>> {
    let layout = doc.layout(container)?;

    let mut sources = Vec::new();
    collect_markup(doc, container, &mut sources)?;

    let mut rows = Vec::new();
    for markup in &sources {
        rows.extend(wrap_spans(&parse_spans(markup), layout.width as usize));
    }

    let overflow = doc
        .computed(container, StyleProperty::Overflow)?
        .as_overflow()
        .unwrap_or_default();
    if overflow != Overflow::Visible {
        rows.truncate(layout.height as usize);
    }
    Ok(rows)
}

/// Plain text of [`preview_rows`].
pub fn preview_lines(doc: &mut CellDocument, container: ElementId) -> Result<Vec<String>> {
    Ok(preview_rows(doc, container)?
        .into_iter()
        .map(|row| row.into_iter().map(|span| span.text).collect())
        .collect())
}

/// Draw a container's rows with their top-left corner at `origin`.
pub fn draw<W: Write>(
    out: &mut W,
    doc: &mut CellDocument,
    container: ElementId,
    origin: (u16, u16),
) -> Result<()> {
    const ATTRIBUTES: [(SpanAttrs, Attribute); 4] = [
        (SpanAttrs::BOLD, Attribute::Bold),
        (SpanAttrs::ITALIC, Attribute::Italic),
        (SpanAttrs::UNDERLINE, Attribute::Underlined),
        (SpanAttrs::STRIKETHROUGH, Attribute::CrossedOut),
    ];

    let (x, y) = origin;
    for (row_index, row) in preview_rows(doc, container)?.iter().enumerate() {
        queue!(out, MoveTo(x, y.saturating_add(row_index as u16)))?;
        for span in row {
            for (flag, attribute) in ATTRIBUTES {
                if span.attrs.contains(flag) {
                    queue!(out, SetAttribute(attribute))?;
                }
            }
            queue!(out, Print(&span.text))?;
            if !span.attrs.is_empty() {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Markup of every markup-holding element under `element`, in tree order.
fn collect_markup(doc: &CellDocument, element: ElementId, out: &mut Vec<String>) -> Result<()> {
    let children = doc.children(element)?;
    if children.is_empty() {
        out.push(doc.inner_markup(element)?.to_string());
        return Ok(());
    }
    for child in children {
        collect_markup(doc, child, out)?;
    }
    Ok(())
}
