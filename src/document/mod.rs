//! A terminal-cell document backed by Taffy.
//!
//! `CellDocument` is a tiny element tree that implements every host trait,
//! so [`TextFitter`](crate::TextFitter) works against it directly:
//!
//! 1. Elements are Taffy nodes; [`ElementId`] wraps the `NodeId`
//! 2. Each element has a declared [`ElementStyle`] plus inline overrides
//! 3. An element holds either markup or child elements
//! 4. Markup is measured on its visible text, wrapped by character in cells
//! 5. Layout runs on the element's root against the viewport width
//!
//! # Example
//!
//! ```
//! use textfit::{CellDocument, ElementStyle, FitOptions, Overflow, TextFitter};
//!
//! let mut doc = CellDocument::new(80);
//! let card = doc.create_text(
//!     ElementStyle::block().with_width(10).with_height(1).with_overflow(Overflow::Hidden),
//!     "The quick brown fox",
//! )?;
//!
//! let mut fitter = TextFitter::new();
//! fitter.fit(&mut doc, card, &FitOptions::default().with_marker("..."))?;
//! assert_eq!(doc.inner_markup(card)?, "The qui...");
//! # Ok::<(), textfit::Error>(())
//! ```

mod style;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use taffy::{AvailableSpace, NodeId, Size, TaffyTree};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};
use crate::host::{Host, LayoutMeasurer, MarkupAccess, StyleReader, StyleWriter};
use crate::text_measure::{grapheme_width, max_line_width, measure_text_height, strip_markup};
use crate::types::{Dimension, StyleProperty, StyleValue};

pub use style::ElementStyle;
use style::{ResolvedStyle, accepts};

/// Handle to an element of a [`CellDocument`].
///
/// Handles remember the document that issued them; passing one to another
/// document is an [`Error::UnknownElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    document: u32,
    node: NodeId,
}

static NEXT_DOCUMENT: AtomicU32 = AtomicU32::new(0);

/// Position and size of an element in cells, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Per-node data stored as the Taffy node context.
#[derive(Debug, Clone, Default)]
struct ElementData {
    declared: ElementStyle,
    inline: HashMap<StyleProperty, StyleValue>,
    markup: Option<String>,
}

/// Element tree measured in terminal cells.
pub struct CellDocument {
    id: u32,
    tree: TaffyTree<ElementData>,
    viewport_width: u16,
}

impl CellDocument {
    /// Create an empty document whose roots lay out against `viewport_width`
    /// columns.
    pub fn new(viewport_width: u16) -> Self {
        Self {
            id: NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed),
            tree: TaffyTree::new(),
            viewport_width,
        }
    }

    pub fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, viewport_width: u16) {
        self.viewport_width = viewport_width;
    }

    /// Create an element with no markup and no children.
    pub fn create_element(&mut self, style: ElementStyle) -> Result<ElementId> {
        self.insert(ElementData {
            declared: style,
            ..Default::default()
        })
    }

    /// Create an element holding `markup`.
    pub fn create_text(
        &mut self,
        style: ElementStyle,
        markup: impl Into<String>,
    ) -> Result<ElementId> {
        self.insert(ElementData {
            declared: style,
            markup: Some(markup.into()),
            ..Default::default()
        })
    }

    fn insert(&mut self, data: ElementData) -> Result<ElementId> {
        let node = self.tree.new_leaf_with_context(taffy::Style::default(), data)?;
        let element = self.element(node);
        self.refresh(element)?;
        Ok(element)
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved, so appending it again to
    /// the same parent moves it to the end.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.data(child)?;
        if self.data(parent)?.markup.is_some() {
            return Err(Error::MixedContent(parent));
        }

        let mut ancestor = Some(parent.node);
        while let Some(node) = ancestor {
            if node == child.node {
                return Err(Error::Cycle { parent, child });
            }
            ancestor = self.tree.parent(node);
        }

        if let Some(old) = self.tree.parent(child.node) {
            self.tree.remove_child(old, child.node)?;
        }
        self.tree.add_child(parent.node, child.node)?;
        // The child may inherit from its new parent.
        self.refresh(child)
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.data(element).ok()?;
        self.tree.parent(element.node).map(|node| self.element(node))
    }

    pub fn children(&self, element: ElementId) -> Result<Vec<ElementId>> {
        self.data(element)?;
        Ok(self
            .tree
            .children(element.node)?
            .into_iter()
            .map(|node| self.element(node))
            .collect())
    }

    /// Markup of an element; empty for elements that hold none.
    pub fn inner_markup(&self, element: ElementId) -> Result<&str> {
        Ok(self.data(element)?.markup.as_deref().unwrap_or(""))
    }

    /// Replace an element's markup.
    pub fn set_inner_markup(&mut self, element: ElementId, markup: impl Into<String>) -> Result<()> {
        if !self.tree.children(self.checked(element)?)?.is_empty() {
            return Err(Error::MixedContent(element));
        }
        self.data_mut(element)?.markup = Some(markup.into());
        self.tree.mark_dirty(element.node)?;
        Ok(())
    }

    pub fn declared_style(&self, element: ElementId) -> Result<ElementStyle> {
        Ok(self.data(element)?.declared)
    }

    /// Replace an element's declared style. Inline overrides stay.
    pub fn set_declared_style(&mut self, element: ElementId, style: ElementStyle) -> Result<()> {
        self.data_mut(element)?.declared = style;
        self.refresh(element)
    }

    /// Computed value: inline over declared, `inherit` resolved through the
    /// ancestors, falling back to the property's initial value at the root.
    pub fn computed(&self, element: ElementId, property: StyleProperty) -> Result<StyleValue> {
        let data = self.data(element)?;
        let value = data
            .inline
            .get(&property)
            .copied()
            .unwrap_or_else(|| data.declared.get(property));

        if value != StyleValue::Length(Dimension::Inherit) {
            return Ok(value);
        }
        match self.tree.parent(element.node) {
            Some(parent) => self.computed(self.element(parent), property),
            None => Ok(property.initial()),
        }
    }

    /// Override a property inline.
    pub fn set_inline(
        &mut self,
        element: ElementId,
        property: StyleProperty,
        value: StyleValue,
    ) -> Result<()> {
        if !accepts(property, value) {
            return Err(Error::InvalidStyle { property, value });
        }
        self.data_mut(element)?.inline.insert(property, value);
        self.refresh(element)
    }

    /// Remove an inline override, falling back to the declared value.
    pub fn clear_inline(&mut self, element: ElementId, property: StyleProperty) -> Result<()> {
        self.data_mut(element)?.inline.remove(&property);
        self.refresh(element)
    }

    /// Lay out the element's tree and return the element's box.
    pub fn layout(&mut self, element: ElementId) -> Result<ElementLayout> {
        let node = self.checked(element)?;
        self.compute(node)?;
        let layout = self.tree.layout(node)?;
        Ok(ElementLayout {
            x: layout.location.x.round() as u16,
            y: layout.location.y.round() as u16,
            width: layout.size.width.round() as u16,
            height: layout.size.height.round() as u16,
        })
    }

    fn compute(&mut self, node: NodeId) -> Result<()> {
        let mut root = node;
        while let Some(parent) = self.tree.parent(root) {
            root = parent;
        }

        let available = Size {
            width: AvailableSpace::Definite(self.viewport_width as f32),
            height: AvailableSpace::MaxContent,
        };
        self.tree.compute_layout_with_measure(
            root,
            available,
            |known_dimensions, available_space, _node_id, context, _style| {
                measure_markup(known_dimensions, available_space, context)
            },
        )?;
        Ok(())
    }

    /// Rebuild the Taffy style of `element` and its descendants.
    fn refresh(&mut self, element: ElementId) -> Result<()> {
        let style = self.resolve(element)?.to_taffy();
        self.tree.set_style(element.node, style)?;
        for child in self.tree.children(element.node)? {
            self.refresh(self.element(child))?;
        }
        Ok(())
    }

    fn resolve(&self, element: ElementId) -> Result<ResolvedStyle> {
        let length = |property| -> Result<Dimension> {
            Ok(self
                .computed(element, property)?
                .as_length()
                .unwrap_or_default())
        };

        Ok(ResolvedStyle {
            display: self
                .computed(element, StyleProperty::Display)?
                .as_display()
                .unwrap_or_default(),
            overflow: self
                .computed(element, StyleProperty::Overflow)?
                .as_overflow()
                .unwrap_or_default(),
            width: self.data(element)?.declared.width,
            height: length(StyleProperty::Height)?,
            max_height: length(StyleProperty::MaxHeight)?,
        })
    }

    fn element(&self, node: NodeId) -> ElementId {
        ElementId {
            document: self.id,
            node,
        }
    }

    fn checked(&self, element: ElementId) -> Result<NodeId> {
        self.data(element).map(|_| element.node)
    }

    fn data(&self, element: ElementId) -> Result<&ElementData> {
        if element.document != self.id {
            return Err(Error::UnknownElement(element));
        }
        self.tree
            .get_node_context(element.node)
            .ok_or(Error::UnknownElement(element))
    }

    fn data_mut(&mut self, element: ElementId) -> Result<&mut ElementData> {
        if element.document != self.id {
            return Err(Error::UnknownElement(element));
        }
        self.tree
            .get_node_context_mut(element.node)
            .ok_or(Error::UnknownElement(element))
    }
}

/// Measure function for elements holding markup.
fn measure_markup(
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    context: Option<&mut ElementData>,
) -> Size<f32> {
    let Some(markup) = context.and_then(|data| data.markup.as_deref()) else {
        return Size::ZERO;
    };

    let visible = strip_markup(markup);
    let content_width = max_line_width(&visible);

    let width = match (known_dimensions.width, available_space.width) {
        (Some(width), _) => width.max(0.0) as usize,
        (None, AvailableSpace::Definite(width)) => content_width.min(width.max(0.0) as usize),
        (None, AvailableSpace::MinContent) => visible
            .graphemes(true)
            .map(grapheme_width)
            .max()
            .unwrap_or(0),
        (None, AvailableSpace::MaxContent) => content_width,
    };
    let rows = measure_text_height(&visible, width.max(1));
    trace!(width, rows, "measured markup");

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(rows as f32),
    }
}

// =============================================================================
// HOST TRAITS
// =============================================================================

impl Host for CellDocument {
    type Element = ElementId;
    type Error = Error;
}

impl StyleReader for CellDocument {
    fn computed_style(&self, element: ElementId, property: StyleProperty) -> Result<StyleValue> {
        self.computed(element, property)
    }
}

impl StyleWriter for CellDocument {
    fn set_inline_style(
        &mut self,
        element: ElementId,
        property: StyleProperty,
        value: StyleValue,
    ) -> Result<()> {
        self.set_inline(element, property, value)
    }
}

impl LayoutMeasurer for CellDocument {
    fn rendered_height(&mut self, element: ElementId) -> Result<f32> {
        let node = self.checked(element)?;
        self.compute(node)?;
        Ok(self.tree.layout(node)?.size.height)
    }
}

impl MarkupAccess for CellDocument {
    fn markup(&self, element: ElementId) -> Result<String> {
        self.inner_markup(element).map(str::to_string)
    }

    fn set_markup(&mut self, element: ElementId, markup: &str) -> Result<()> {
        self.set_inner_markup(element, markup)
    }
}
