//! Text fitting.
//!
//! [`TextFitter`] shrinks a content block's markup until it fits the height
//! its container had before the call, appending a marker when it cuts.
//!
//! # Algorithm
//!
//! 1. **Snapshot**: capture (or restore) the original markup, capped at
//!    `max_length` characters.
//! 2. **Budget**: read the container's rendered height, then relax it to
//!    `overflow: visible; max-height: inherit; height: auto`.
//! 3. **Search**: if the full text overflows, binary-search the longest
//!    character prefix that fits with the marker appended. Each candidate is
//!    moved out of any unterminated tag before it is measured, so a marker is
//!    never swallowed by a half-written tag. Rendered height is assumed to be
//!    non-decreasing in prefix length; floated or absolutely positioned
//!    children can break that.
//! 4. **Apply**: take the accepted prefix, optionally back to a word
//!    boundary, keep it out of tags, and write it plus the marker.
//! 5. **Restore**: put the container's `overflow`, `max-height` and `height`
//!    back, even when the host failed part way.
//!
//! Each candidate writes markup and reads the height straight back, so a call
//! costs O(log N) layouts for N characters.

mod cut;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::host::FitHost;
use crate::options::FitOptions;
use crate::types::{Dimension, Display, FitOutcome, Overflow, StyleProperty, StyleValue};

use cut::{CharText, tag_safe_cut, word_boundary};

/// Fits markup into fixed-height containers.
///
/// Owns the cache of original (untruncated) markup per content block, so
/// repeated calls re-fit from the same source instead of shrinking an
/// already truncated result. Drop entries with [`forget`](Self::forget) when
/// an element goes away.
#[derive(Debug, Clone)]
pub struct TextFitter<E> {
    originals: HashMap<E, String>,
}

impl<E> Default for TextFitter<E> {
    fn default() -> Self {
        Self {
            originals: HashMap::new(),
        }
    }
}

impl<E> TextFitter<E>
where
    E: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the container's own markup into the container.
    pub fn fit<H>(
        &mut self,
        host: &mut H,
        container: E,
        options: &FitOptions,
    ) -> Result<FitOutcome, H::Error>
    where
        H: FitHost<Element = E>,
    {
        self.fit_into(host, container, container, options)
    }

    /// Fit `content`'s markup into `container`.
    ///
    /// A container that isn't `overflow: hidden; display: block` is left
    /// alone and reported as [`FitOutcome::PreconditionFailed`]. Host errors
    /// are returned after the container's styles have been restored.
    pub fn fit_into<H>(
        &mut self,
        host: &mut H,
        container: E,
        content: E,
        options: &FitOptions,
    ) -> Result<FitOutcome, H::Error>
    where
        H: FitHost<Element = E>,
    {
        if !accepts_fitting(host, container)? {
            debug!(?container, "container is not overflow:hidden block, skipping");
            return Ok(FitOutcome::PreconditionFailed);
        }

        let text = self.snapshot(host, content, options)?;

        let budget = host.rendered_height(container)?;
        let saved = SavedStyles {
            max_height: host.computed_style(container, StyleProperty::MaxHeight)?,
            height: host.computed_style(container, StyleProperty::Height)?,
        };
        debug!(?container, ?content, budget, chars = text.chars().count(), "fitting text");

        let result = relax(host, container).and_then(|()| {
            Fitting {
                host: &mut *host,
                container,
                content,
                text: CharText::new(text),
                marker: &options.append_marker,
                budget,
                rendered: None,
            }
            .run(options)
        });
        let restored = saved.restore(host, container);

        let outcome = result?;
        restored?;
        debug!(?container, ?outcome, "fit finished");
        Ok(outcome)
    }

    /// Cached original markup for a content block, if any.
    pub fn cached_text(&self, content: E) -> Option<&str> {
        self.originals.get(&content).map(String::as_str)
    }

    /// Drop the cached original for a content block.
    pub fn forget(&mut self, content: E) -> Option<String> {
        self.originals.remove(&content)
    }

    /// Drop every cached original.
    pub fn clear(&mut self) {
        self.originals.clear();
    }

    /// Number of content blocks with a cached original.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Capture the original markup, or write the cached one back.
    fn snapshot<H>(
        &mut self,
        host: &mut H,
        content: E,
        options: &FitOptions,
    ) -> Result<&str, H::Error>
    where
        H: FitHost<Element = E>,
    {
        let text = match self.originals.entry(content) {
            Entry::Occupied(mut slot) if options.force_reset => {
                slot.insert(capture(host, content, options.max_length)?);
                slot.into_mut()
            }
            Entry::Occupied(slot) => {
                host.set_markup(content, slot.get())?;
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(capture(host, content, options.max_length)?),
        };
        Ok(text.as_str())
    }
}

/// Read the live markup, applying the `max_length` cap to it.
fn capture<H: FitHost>(
    host: &mut H,
    content: H::Element,
    max_length: Option<usize>,
) -> Result<String, H::Error> {
    let mut text = host.markup(content)?;
    if let Some((cut, _)) = max_length.and_then(|limit| text.char_indices().nth(limit)) {
        text.truncate(cut);
        host.set_markup(content, &text)?;
        debug!(?content, max_length, "capped original text");
    }
    Ok(text)
}

fn accepts_fitting<H: FitHost>(host: &H, container: H::Element) -> Result<bool, H::Error> {
    let overflow = host.computed_style(container, StyleProperty::Overflow)?;
    let display = host.computed_style(container, StyleProperty::Display)?;
    Ok(overflow.as_overflow() == Some(Overflow::Hidden)
        && display.as_display() == Some(Display::Block))
}

/// Let the container grow with its content while probing.
fn relax<H: FitHost>(host: &mut H, container: H::Element) -> Result<(), H::Error> {
    host.set_inline_style(container, StyleProperty::Overflow, Overflow::Visible.into())?;
    host.set_inline_style(container, StyleProperty::MaxHeight, Dimension::Inherit.into())?;
    host.set_inline_style(container, StyleProperty::Height, Dimension::Auto.into())
}

/// Container sizing captured before relaxing.
struct SavedStyles {
    max_height: StyleValue,
    height: StyleValue,
}

impl SavedStyles {
    fn restore<H: FitHost>(self, host: &mut H, container: H::Element) -> Result<(), H::Error> {
        host.set_inline_style(container, StyleProperty::Overflow, Overflow::Hidden.into())?;
        host.set_inline_style(container, StyleProperty::MaxHeight, self.max_height)?;
        host.set_inline_style(container, StyleProperty::Height, self.height)
    }
}

/// One search over one content block.
struct Fitting<'a, H: FitHost> {
    host: &'a mut H,
    container: H::Element,
    content: H::Element,
    text: CharText<'a>,
    marker: &'a str,
    budget: f32,
    /// Prefix length of the markup last written.
    rendered: Option<usize>,
}

impl<H: FitHost> Fitting<'_, H> {
    fn run(mut self, options: &FitOptions) -> Result<FitOutcome, H::Error> {
        let mut min = 0;
        let mut max = self.text.len();
        let mut culling = options.force_append;
        // Longest prefix the search accepted; `None` when the text fit as is.
        let mut cut = None;

        // Empty text has nothing to cut, whatever the host measures.
        if !self.text.is_empty() && self.overflows()? {
            let mut mid = max;
            while max - min > 1 {
                mid = min + (max - min) / 2;
                self.render(self.tag_safe(mid))?;
                let height = self.host.rendered_height(self.container)?;
                trace!(mid, min, max, height, budget = self.budget, "candidate");
                if height > self.budget {
                    max = mid;
                } else {
                    min = mid;
                }
            }

            cut = Some(min.min(mid));
            culling = true;
        }

        if !culling {
            return Ok(FitOutcome::NotNeeded);
        }

        let end = match cut {
            // Forced append on text that already fits.
            None => self.text.len(),
            Some(cut) if options.break_on_word => {
                self.tag_safe(word_boundary(&self.text, self.tag_safe(cut)))
            }
            Some(cut) => self.tag_safe(cut),
        };
        if self.rendered != Some(end) {
            self.render(end)?;
        }

        Ok(FitOutcome::Fitted)
    }

    /// `cut`, moved out of any unterminated tag.
    fn tag_safe(&self, cut: usize) -> usize {
        match tag_safe_cut(&self.text, cut) {
            Some(safe) => {
                trace!(from = cut, to = safe, "cut moved out of a tag");
                safe
            }
            None => cut,
        }
    }

    /// Write the first `len` characters plus the marker.
    fn render(&mut self, len: usize) -> Result<(), H::Error> {
        let prefix = self.text.prefix(len);
        let mut markup = String::with_capacity(prefix.len() + self.marker.len());
        markup.push_str(prefix);
        markup.push_str(self.marker);
        self.host.set_markup(self.content, &markup)?;
        self.rendered = Some(len);
        Ok(())
    }

    fn overflows(&mut self) -> Result<bool, H::Error> {
        Ok(self.host.rendered_height(self.container)? > self.budget)
    }
}
