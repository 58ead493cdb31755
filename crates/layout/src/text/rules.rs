use crate::LayoutError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dictionary of words with explicit break points, written as
/// `"hy-phen-ation"`.
///
/// Lookups ignore case. Break points are character offsets into the word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RuleSet {
    words: HashMap<String, Vec<usize>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::new();
        for pattern in patterns {
            rules.add(pattern.as_ref())?;
        }
        Ok(rules)
    }

    /// Adds or replaces the entry for one word.
    pub fn add(&mut self, pattern: &str) -> Result<&mut Self, LayoutError> {
        let invalid = |reason: &str| LayoutError::InvalidRule(format!("'{pattern}': {reason}"));
        if pattern.is_empty() {
            return Err(invalid("empty pattern"));
        }
        if pattern.starts_with('-') || pattern.ends_with('-') {
            return Err(invalid("a break needs letters on both sides"));
        }
        if pattern.contains("--") {
            return Err(invalid("consecutive breaks"));
        }

        let mut word = String::with_capacity(pattern.len());
        let mut breaks = Vec::new();
        let mut count = 0;
        for c in pattern.chars() {
            if c == '-' {
                breaks.push(count);
            } else if c.is_whitespace() {
                return Err(invalid("patterns are single words"));
            } else {
                word.extend(c.to_lowercase());
                count += 1;
            }
        }
        self.words.insert(word, breaks);
        Ok(self)
    }

    /// The break offsets for `word`, if the dictionary knows it.
    pub fn breaks_for(&self, word: &str) -> Option<&[usize]> {
        self.words.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The entries back in `"hy-phen-ation"` form, sorted.
    pub fn patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .words
            .iter()
            .map(|(word, breaks)| {
                let mut pattern = String::with_capacity(word.len() + breaks.len());
                for (i, c) in word.chars().enumerate() {
                    if breaks.contains(&i) {
                        pattern.push('-');
                    }
                    pattern.push(c);
                }
                pattern
            })
            .collect();
        patterns.sort();
        patterns
    }
}

impl TryFrom<Vec<String>> for RuleSet {
    type Error = LayoutError;

    fn try_from(patterns: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_patterns(patterns)
    }
}

impl From<RuleSet> for Vec<String> {
    fn from(rules: RuleSet) -> Self {
        rules.patterns()
    }
}
