//! # textfit
//!
//! Fit markup into fixed-height containers.
//!
//! [`TextFitter`] binary-searches the longest prefix of a content block's
//! markup that keeps its container within the height the container had
//! before the call, and appends a marker (`…` by default) when it cuts.
//! Cuts never end inside a tag and can retreat to word boundaries.
//!
//! The fitter drives a host through small traits ([`StyleReader`],
//! [`StyleWriter`], [`LayoutMeasurer`], [`MarkupAccess`]). [`CellDocument`]
//! is a ready-made host for terminal UIs: a Taffy element tree measured in
//! cells, with a crossterm preview in [`render`].
//!
//! ## Modules
//!
//! - [`types`] - Style values and the fit outcome
//! - [`host`] - Collaborator traits a host implements
//! - [`fitter`] - The fitting algorithm and original-text cache
//! - [`document`] - Taffy-backed cell document
//! - [`text_measure`] - Markup stripping, cell widths, wrapping
//! - [`render`] - Styled terminal preview

pub mod document;
pub mod error;
pub mod fitter;
pub mod host;
pub mod options;
pub mod render;
pub mod text_measure;
pub mod types;

pub use types::*;

pub use document::{CellDocument, ElementId, ElementLayout, ElementStyle};
pub use error::{Error, Result};
pub use fitter::TextFitter;
pub use host::{FitHost, Host, LayoutMeasurer, MarkupAccess, StyleReader, StyleWriter};
pub use options::{DEFAULT_MARKER, FitOptions};
pub use render::{Span, SpanAttrs, draw, preview_lines};
pub use text_measure::{measure_text_height, string_width, strip_markup, wrap_text};
