//! Per-call fitting options.

use serde::{Deserialize, Serialize};

/// Marker appended to truncated text when none is configured (U+2026).
pub const DEFAULT_MARKER: &str = "\u{2026}";

/// Options for a single fitting call.
///
/// Deserializes from a camelCase options object; the short legacy names
/// (`word`, `append`, `maxlength`, `reset`, `force`) are accepted too.
///
/// ```
/// use textfit::FitOptions;
///
/// let options = FitOptions::default()
///     .with_break_on_word(true)
///     .with_marker("...");
/// assert_eq!(options.append_marker, "...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitOptions {
    /// Retreat the cut to a word boundary before appending the marker.
    #[serde(alias = "word")]
    pub break_on_word: bool,

    /// Appended after the cut.
    #[serde(alias = "append")]
    pub append_marker: String,

    /// Hard cap, in characters, applied to the original text when it is
    /// captured. Never undone.
    #[serde(alias = "maxlength")]
    pub max_length: Option<usize>,

    /// Discard the cached original and capture the live markup again.
    #[serde(alias = "reset")]
    pub force_reset: bool,

    /// Append the marker even when the text already fits.
    #[serde(alias = "force")]
    pub force_append: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            break_on_word: false,
            append_marker: DEFAULT_MARKER.to_string(),
            max_length: None,
            force_reset: false,
            force_append: false,
        }
    }
}

impl FitOptions {
    pub fn with_break_on_word(mut self, break_on_word: bool) -> Self {
        self.break_on_word = break_on_word;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.append_marker = marker.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_force_reset(mut self, force_reset: bool) -> Self {
        self.force_reset = force_reset;
        self
    }

    pub fn with_force_append(mut self, force_append: bool) -> Self {
        self.force_append = force_append;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = FitOptions::default();
        assert!(!options.break_on_word);
        assert_eq!(options.append_marker, "…");
        assert_eq!(options.max_length, None);
        assert!(!options.force_reset);
        assert!(!options.force_append);
    }

    #[test]
    fn builder_chain() {
        let options = FitOptions::default()
            .with_max_length(80)
            .with_force_reset(true)
            .with_force_append(true);
        assert_eq!(options.max_length, Some(80));
        assert!(options.force_reset);
        assert!(options.force_append);
    }

    #[test]
    fn deserialize_camel_case() {
        let options: FitOptions = serde_json::from_str(
            r#"{"breakOnWord": true, "appendMarker": "...", "maxLength": 12}"#,
        )
        .unwrap();
        assert!(options.break_on_word);
        assert_eq!(options.append_marker, "...");
        assert_eq!(options.max_length, Some(12));
        assert!(!options.force_append);
    }

    #[test]
    fn deserialize_legacy_names() {
        let options: FitOptions = serde_json::from_str(
            r#"{"word": true, "append": " [more]", "maxlength": 5, "reset": true, "force": true}"#,
        )
        .unwrap();
        assert_eq!(
            options,
            FitOptions {
                break_on_word: true,
                append_marker: " [more]".to_string(),
                max_length: Some(5),
                force_reset: true,
                force_append: true,
            }
        );
    }

    #[test]
    fn deserialize_empty_object_is_default() {
        let options: FitOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, FitOptions::default());
    }
}
