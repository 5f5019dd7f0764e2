//! Core types for textfit.
//!
//! Style values the fitter reads from and writes to a host, and the outcome
//! reported by a fitting call.

// =============================================================================
// Overflow / Display
// =============================================================================

/// Overflow behavior for containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Content can overflow container bounds (default).
    #[default]
    Visible,
    /// Content is clipped at container bounds.
    Hidden,
    /// Content is scrollable.
    Scroll,
    /// Scroll only if content overflows.
    Auto,
}

/// Outer display type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    Inline,
    Flex,
    None,
}

// =============================================================================
// Dimension - Supports absolute and percentage values
// =============================================================================

/// A length-like style value.
///
/// - `Auto`: size from content
/// - `Cells(n)`: absolute value in terminal cells
/// - `Percent(n)`: percentage of the parent (0-100)
/// - `None`: no limit (only meaningful for `max-height`)
/// - `Inherit`: take the parent's computed value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Cells(u16),
    Percent(f32),
    None,
    Inherit,
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        Self::Cells(value)
    }
}

// =============================================================================
// Style properties
// =============================================================================

/// The style properties a fitting call reads or overrides on its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Overflow,
    Display,
    MaxHeight,
    Height,
}

impl StyleProperty {
    /// CSS property name.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Overflow => "overflow",
            Self::Display => "display",
            Self::MaxHeight => "max-height",
            Self::Height => "height",
        }
    }

    /// Value a property takes when nothing declares it.
    pub const fn initial(self) -> StyleValue {
        match self {
            Self::Overflow => StyleValue::Overflow(Overflow::Visible),
            Self::Display => StyleValue::Display(Display::Block),
            Self::MaxHeight => StyleValue::Length(Dimension::None),
            Self::Height => StyleValue::Length(Dimension::Auto),
        }
    }
}

/// A computed or inline style value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    Overflow(Overflow),
    Display(Display),
    Length(Dimension),
}

impl StyleValue {
    pub fn as_overflow(self) -> Option<Overflow> {
        match self {
            Self::Overflow(overflow) => Some(overflow),
            _ => None,
        }
    }

    pub fn as_display(self) -> Option<Display> {
        match self {
            Self::Display(display) => Some(display),
            _ => None,
        }
    }

    pub fn as_length(self) -> Option<Dimension> {
        match self {
            Self::Length(dimension) => Some(dimension),
            _ => None,
        }
    }
}

impl From<Overflow> for StyleValue {
    fn from(value: Overflow) -> Self {
        Self::Overflow(value)
    }
}

impl From<Display> for StyleValue {
    fn from(value: Display) -> Self {
        Self::Display(value)
    }
}

impl From<Dimension> for StyleValue {
    fn from(value: Dimension) -> Self {
        Self::Length(value)
    }
}

// =============================================================================
// FitOutcome
// =============================================================================

/// What a fitting call did.
///
/// The content block's markup is the real result; this only tells the three
/// quiet cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    /// The marker was applied, either because the text was truncated or
    /// because appending was forced.
    Fitted,
    /// The text already fit and nothing was appended.
    NotNeeded,
    /// The container is not `overflow: hidden; display: block`. Nothing was
    /// touched.
    PreconditionFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        assert_eq!(
            StyleProperty::MaxHeight.initial(),
            StyleValue::Length(Dimension::None)
        );
        assert_eq!(
            StyleProperty::Height.initial(),
            StyleValue::Length(Dimension::Auto)
        );
        assert_eq!(
            StyleProperty::Overflow.initial().as_overflow(),
            Some(Overflow::Visible)
        );
    }

    #[test]
    fn test_style_value_accessors() {
        let value = StyleValue::from(Dimension::Cells(3));
        assert_eq!(value.as_length(), Some(Dimension::Cells(3)));
        assert_eq!(value.as_overflow(), None);
        assert_eq!(value.as_display(), None);
        assert_eq!(StyleProperty::MaxHeight.css_name(), "max-height");
    }
}
