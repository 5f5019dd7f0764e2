//! Text measurement for terminal rendering.
//!
//! Provides markup stripping, Unicode-aware width calculation, and
//! character-break wrapping.
//!
//! # Implementation
//!
//! Uses `unicode-width` (East Asian Width tables) and `unicode-segmentation`
//! (UAX #29 grapheme cluster boundaries) as the foundation, with custom
//! handling for markup tags, entities and emoji sequences.

pub mod markup;
mod width;
mod wrap;

pub use markup::{Tag, Token, decode_entity, strip_markup, tokens};
pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{max_line_width, measure_text_height, wrap_text};
