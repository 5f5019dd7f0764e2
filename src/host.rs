//! Host collaborator traits.
//!
//! The fitter never owns elements. Whatever renders them (a browser bridge,
//! a terminal document, a test double) implements these traits and hands
//! itself to [`TextFitter`](crate::TextFitter) for the duration of a call.
//!
//! Every method is synchronous and must reflect the most recent markup or
//! style mutation immediately: the search writes a candidate and reads the
//! height straight back.

use std::fmt::Debug;
use std::hash::Hash;

use crate::types::{StyleProperty, StyleValue};

/// Names the element handle and error types shared by the other traits.
pub trait Host {
    /// Cheap handle identifying an element. Also the key of the fitter's
    /// original-text cache, so it must stay stable for the element's lifetime.
    type Element: Copy + Eq + Hash + Debug;

    /// Error reported by any collaborator call.
    type Error;
}

/// Reads the effective (computed) value of a style property.
pub trait StyleReader: Host {
    fn computed_style(
        &self,
        element: Self::Element,
        property: StyleProperty,
    ) -> Result<StyleValue, Self::Error>;
}

/// Overrides a style property inline on an element.
pub trait StyleWriter: Host {
    fn set_inline_style(
        &mut self,
        element: Self::Element,
        property: StyleProperty,
        value: StyleValue,
    ) -> Result<(), Self::Error>;
}

/// Measures the current rendered height of an element.
///
/// Takes `&mut self` because a host may lay out lazily on read.
pub trait LayoutMeasurer: Host {
    fn rendered_height(&mut self, element: Self::Element) -> Result<f32, Self::Error>;
}

/// Reads and replaces an element's inner markup.
pub trait MarkupAccess: Host {
    fn markup(&self, element: Self::Element) -> Result<String, Self::Error>;

    fn set_markup(&mut self, element: Self::Element, markup: &str) -> Result<(), Self::Error>;
}

/// Everything a fitting call needs from its host.
pub trait FitHost: StyleReader + StyleWriter + LayoutMeasurer + MarkupAccess {}

impl<T> FitHost for T where T: StyleReader + StyleWriter + LayoutMeasurer + MarkupAccess {}
