//! Error types for the cell document and terminal preview.

use thiserror::Error;

use crate::document::ElementId;
use crate::types::{StyleProperty, StyleValue};

/// Errors returned by [`CellDocument`](crate::CellDocument) and the preview
/// renderer.
#[derive(Error, Debug)]
pub enum Error {
    /// The handle does not name an element of this document.
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// An element holds either markup or child elements, never both.
    #[error("element {0:?} cannot hold both markup and child elements")]
    MixedContent(ElementId),

    /// Appending would make an element its own ancestor.
    #[error("cannot append {child:?} to {parent:?}: it is {parent:?} or one of its ancestors")]
    Cycle { parent: ElementId, child: ElementId },

    /// The value's kind doesn't match the property.
    #[error("{value:?} is not a valid value for {}", .property.css_name())]
    InvalidStyle {
        property: StyleProperty,
        value: StyleValue,
    },

    /// Taffy rejected a tree operation or layout pass.
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// Writing the preview to the terminal failed.
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for document and preview operations.
pub type Result<T> = std::result::Result<T, Error>;
