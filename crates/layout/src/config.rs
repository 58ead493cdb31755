use crate::LayoutError;
use crate::text::HyphenationStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Whether words may be split across lines at all.
    ///
    /// - **true**: overflowing words are hyphenated according to `hyphenation`.
    /// - **false**: lines only break on whitespace, and a word too long for a
    ///   line overflows it.
    ///
    /// Defaults to `true`.
    pub hyphenate: bool,

    /// The rules used to split words: the hyphen characters, the minimum
    /// number of characters on each side of a split, the shortest word that
    /// may be split, and an optional dictionary of explicit break points.
    ///
    /// Defaults to a `-` hyphen, words of 5 or more characters, 2 characters
    /// before and 3 after the split.
    pub hyphenation: HyphenationStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hyphenate: true,
            hyphenation: HyphenationStrategy::default(),
        }
    }
}

impl LayoutConfig {
    /// Rejects strategies that could never produce a sensible break.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let strategy = &self.hyphenation;
        for c in [strategy.hyphen_append, strategy.hyphen_prepend].into_iter().flatten() {
            if c.is_whitespace() || c.is_alphanumeric() {
                return Err(LayoutError::Config(format!(
                    "hyphen character {c:?} must not be a letter, digit or whitespace"
                )));
            }
        }
        if self.hyphenate && strategy.min_chars_before == 0 && strategy.min_chars_after == 0 {
            return Err(LayoutError::Config(
                "minCharsBefore and minCharsAfter cannot both be 0".to_string(),
            ));
        }
        Ok(())
    }
}
