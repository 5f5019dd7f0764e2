//! Element styles and their Taffy conversion.

use taffy::{
    Dimension as TaffyDimension, Display as TaffyDisplay, Overflow as TaffyOverflow, Point, Size,
    Style,
};

use crate::types::{Dimension, Display, Overflow, StyleProperty, StyleValue};

/// Declared style of an element.
///
/// ```
/// use textfit::{Dimension, ElementStyle, Overflow};
///
/// let card = ElementStyle::block()
///     .with_width(24)
///     .with_height(3)
///     .with_overflow(Overflow::Hidden);
/// assert_eq!(card.height, Dimension::Cells(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub display: Display,
    pub overflow: Overflow,
    pub width: Dimension,
    pub height: Dimension,
    pub max_height: Dimension,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            overflow: Overflow::Visible,
            width: Dimension::Auto,
            height: Dimension::Auto,
            max_height: Dimension::None,
        }
    }
}

impl ElementStyle {
    /// A block with auto size and visible overflow.
    pub fn block() -> Self {
        Self::default()
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self
    }

    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = height.into();
        self
    }

    pub fn with_max_height(mut self, max_height: impl Into<Dimension>) -> Self {
        self.max_height = max_height.into();
        self
    }

    /// Declared value of a fitter-visible property.
    pub fn get(&self, property: StyleProperty) -> StyleValue {
        match property {
            StyleProperty::Overflow => self.overflow.into(),
            StyleProperty::Display => self.display.into(),
            StyleProperty::MaxHeight => self.max_height.into(),
            StyleProperty::Height => self.height.into(),
        }
    }
}

/// Whether `value` is the right kind for `property`.
pub(crate) fn accepts(property: StyleProperty, value: StyleValue) -> bool {
    matches!(
        (property, value),
        (StyleProperty::Overflow, StyleValue::Overflow(_))
            | (StyleProperty::Display, StyleValue::Display(_))
            | (StyleProperty::MaxHeight | StyleProperty::Height, StyleValue::Length(_))
    )
}

/// Fully resolved style of one element: inline over declared, `inherit`
/// already replaced by the parent's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedStyle {
    pub display: Display,
    pub overflow: Overflow,
    pub width: Dimension,
    pub height: Dimension,
    pub max_height: Dimension,
}

impl ResolvedStyle {
    pub(crate) fn to_taffy(self) -> Style {
        let overflow = to_taffy_overflow(self.overflow);
        Style {
            display: to_taffy_display(self.display),
            overflow: Point {
                x: overflow,
                y: overflow,
            },
            size: Size {
                width: to_taffy_dimension(self.width),
                height: to_taffy_dimension(self.height),
            },
            max_size: Size {
                width: TaffyDimension::Auto,
                height: to_taffy_dimension(self.max_height),
            },
            ..Default::default()
        }
    }
}

// =============================================================================
// TAFFY CONVERSIONS
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
        Dimension::Auto | Dimension::None | Dimension::Inherit => TaffyDimension::Auto,
    }
}

// Inline boxes are laid out as blocks; there is no inline formatting context.
fn to_taffy_display(display: Display) -> TaffyDisplay {
    match display {
        Display::Block | Display::Inline => TaffyDisplay::Block,
        Display::Flex => TaffyDisplay::Flex,
        Display::None => TaffyDisplay::None,
    }
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Hidden,
        Overflow::Scroll | Overflow::Auto => TaffyOverflow::Scroll,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconstrained_block() {
        let style = ElementStyle::default();
        assert_eq!(style.get(StyleProperty::Display), StyleValue::Display(Display::Block));
        assert_eq!(style.get(StyleProperty::MaxHeight), StyleValue::Length(Dimension::None));
        assert_eq!(style.get(StyleProperty::Height), StyleValue::Length(Dimension::Auto));
    }

    #[test]
    fn accepts_matching_kinds_only() {
        assert!(accepts(StyleProperty::Height, Dimension::Cells(2).into()));
        assert!(accepts(StyleProperty::Overflow, Overflow::Hidden.into()));
        assert!(!accepts(StyleProperty::Height, Overflow::Hidden.into()));
        assert!(!accepts(StyleProperty::Display, Dimension::Auto.into()));
    }

    #[test]
    fn taffy_conversion() {
        let style = ResolvedStyle {
            display: Display::Block,
            overflow: Overflow::Hidden,
            width: Dimension::Cells(20),
            height: Dimension::Percent(50.0),
            max_height: Dimension::None,
        }
        .to_taffy();
        assert_eq!(style.display, TaffyDisplay::Block);
        assert_eq!(style.overflow.y, TaffyOverflow::Hidden);
        assert_eq!(style.size.width, TaffyDimension::Length(20.0));
        assert_eq!(style.size.height, TaffyDimension::Percent(0.5));
        assert_eq!(style.max_size.height, TaffyDimension::Auto);
    }
}
