//! Markup tokenizing for measurement and preview.
//!
//! Not an HTML parser. Splits markup into text runs, decoded entities and
//! tags, which is all measurement needs:
//! - `<...>` is a tag; an unterminated trailing `<` and everything after it
//!   is dropped, the way a half-written tag doesn't render
//! - `&name;` / `&#NNN;` / `&#xHH;` decode to one character; anything
//!   unrecognised stays literal
//! - `<br>` is the only tag that produces visible output (a line break)

use std::borrow::Cow;

/// Longest entity body we try to decode (`&...;`).
const MAX_ENTITY_LEN: usize = 10;

/// A tag, with its name as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub closing: bool,
}

impl Tag<'_> {
    fn parse(inner: &str) -> Tag<'_> {
        let closing = inner.starts_with('/');
        let name = inner
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("");
        Tag { name, closing }
    }

    /// `<br>`, `<br/>`, `<br />`.
    pub fn is_line_break(&self) -> bool {
        self.name.eq_ignore_ascii_case("br")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Entity(char),
    Tag(Tag<'a>),
}

/// Iterator over the tokens of a markup string.
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Tokenize markup.
pub fn tokens(markup: &str) -> Tokens<'_> {
    Tokens { rest: markup }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        if rest.is_empty() {
            return None;
        }

        match rest.find(['<', '&']) {
            Some(0) => {}
            Some(pos) => {
                self.rest = &rest[pos..];
                return Some(Token::Text(&rest[..pos]));
            }
            None => {
                self.rest = "";
                return Some(Token::Text(rest));
            }
        }

        if rest.starts_with('<') {
            return match rest.find('>') {
                Some(end) => {
                    self.rest = &rest[end + 1..];
                    Some(Token::Tag(Tag::parse(&rest[1..end])))
                }
                None => {
                    self.rest = "";
                    None
                }
            };
        }

        // '&': an entity, or a literal ampersand.
        if let Some(end) = rest[1..].find(';').filter(|&end| end <= MAX_ENTITY_LEN) {
            if let Some(c) = decode_entity(&rest[1..1 + end]) {
                self.rest = &rest[end + 2..];
                return Some(Token::Entity(c));
            }
        }
        self.rest = &rest[1..];
        Some(Token::Text(&rest[..1]))
    }
}

/// Visible text of a markup string.
///
/// Returns `Cow::Borrowed` when there is nothing to strip or decode.
pub fn strip_markup(markup: &str) -> Cow<'_, str> {
    if !markup.contains(['<', '&']) {
        return Cow::Borrowed(markup);
    }

    let mut visible = String::with_capacity(markup.len());
    for token in tokens(markup) {
        match token {
            Token::Text(text) => visible.push_str(text),
            Token::Entity(c) => visible.push(c),
            Token::Tag(tag) if tag.is_line_break() => visible.push('\n'),
            Token::Tag(_) => {}
        }
    }
    Cow::Owned(visible)
}

/// Decode an entity body (the part between `&` and `;`).
pub fn decode_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        return decode_numeric_entity(numeric);
    }

    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "copy" => '\u{00A9}',
        _ => return None,
    };
    Some(c)
}

fn decode_numeric_entity(digits: &str) -> Option<char> {
    let (digits, radix) = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (digits, 10),
    };
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_plain_borrows() {
        assert!(matches!(strip_markup("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn strip_tags() {
        assert_eq!(strip_markup("<b>Hello</b> World"), "Hello World");
        assert_eq!(strip_markup("<span class=\"x\">a</span>b"), "ab");
    }

    #[test]
    fn strip_unterminated_tag() {
        assert_eq!(strip_markup("<b>Hello</"), "Hello");
        assert_eq!(strip_markup("Hi <em"), "Hi ");
    }

    #[test]
    fn strip_line_breaks() {
        assert_eq!(strip_markup("a<br>b<BR/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn strip_entities() {
        assert_eq!(strip_markup("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(strip_markup("wait&#8230;"), "wait…");
        assert_eq!(strip_markup("wait&hellip;"), "wait…");
        assert_eq!(strip_markup("&#x41;&lt;&gt;"), "A<>");
    }

    #[test]
    fn literal_ampersands_survive() {
        assert_eq!(strip_markup("a & b"), "a & b");
        assert_eq!(strip_markup("&bogus;"), "&bogus;");
        assert_eq!(strip_markup("trailing &"), "trailing &");
    }

    #[test]
    fn token_stream() {
        let tokens: Vec<Token<'_>> = tokens("<i>x</i>&amp;").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Tag(Tag { name: "i", closing: false }),
                Token::Text("x"),
                Token::Tag(Tag { name: "i", closing: true }),
                Token::Entity('&'),
            ]
        );
    }

    #[test]
    fn tag_names_ignore_attributes() {
        let tag = Tag::parse("a href=\"#\"");
        assert_eq!(tag.name, "a");
        assert!(!tag.closing);
        assert!(Tag::parse("br/").is_line_break());
    }

    #[test]
    fn numeric_entities() {
        assert_eq!(decode_entity("#160"), Some('\u{00A0}'));
        assert_eq!(decode_entity("#xZZ"), None);
        assert_eq!(decode_entity("#"), None);
        assert_eq!(decode_entity("#xD800"), None); // surrogate
    }
}
