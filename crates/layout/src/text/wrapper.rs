use super::hyphenation::{HyphenationOpportunity, HyphenationStrategy, hyphenate_chars, is_word_break};
use crate::LayoutConfig;

/// One output line of [`Hyphenator::wrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    /// The text to draw, including any hyphen characters that were added.
    pub text: String,
    /// Character offset of the line's first source character.
    pub start: usize,
    /// Number of source characters on the line.
    pub length: usize,
    pub hyphenated: bool,
}

/// The result of breaking a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSplit {
    pub line: WrappedLine,
    /// Where the next line starts, after any dropped whitespace.
    pub next_start: usize,
    /// Character to put in front of the next line.
    pub carry: Option<char>,
}

/// Applies a [`HyphenationStrategy`] to successive overflowing lines.
///
/// Widths are measured in characters; callers with real font metrics pass the
/// number of characters that fit as `max_chars`.
#[derive(Debug, Clone, Default)]
pub struct Hyphenator {
    strategy: HyphenationStrategy,
}

impl Hyphenator {
    pub fn new(strategy: HyphenationStrategy) -> Self {
        Self { strategy }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        if config.hyphenate {
            Self::new(config.hyphenation.clone())
        } else {
            Self::new(HyphenationStrategy::none())
        }
    }

    pub fn strategy(&self) -> &HyphenationStrategy {
        &self.strategy
    }

    pub fn opportunity(&self, text: &str, start: usize, length: usize) -> HyphenationOpportunity {
        super::hyphenation::hyphenate_line(text, start, length, &self.strategy)
    }

    /// Takes one line of at most `max_chars` characters from `chars[start..]`.
    ///
    /// A word that cannot be broken and does not fit is put on the line whole.
    pub fn split_line(&self, chars: &[char], start: usize, max_chars: usize) -> LineSplit {
        let remaining = chars.len().saturating_sub(start);
        if remaining <= max_chars {
            return LineSplit {
                line: WrappedLine {
                    text: chars[start.min(chars.len())..].iter().collect(),
                    start,
                    length: remaining,
                    hyphenated: false,
                },
                next_start: chars.len(),
                carry: None,
            };
        }

        let op = hyphenate_chars(chars, start, max_chars, &self.strategy);
        let (length, trim) = if op.new_length == 0 {
            let word = chars[start..]
                .iter()
                .position(|c| is_word_break(*c))
                .unwrap_or(remaining)
                .max(1);
            log::debug!("Word at {} does not fit in {} characters; overflowing", start, max_chars);
            (word, true)
        } else {
            (op.new_length, op.remove_split_whitespace)
        };

        let mut text: String = chars[start..start + length].iter().collect();
        if let Some(hyphen) = op.append_hyphen {
            text.push(hyphen);
        }

        let mut next_start = start + length;
        if trim {
            next_start += chars[next_start..].iter().take_while(|c| is_word_break(**c)).count();
        }

        LineSplit {
            line: WrappedLine {
                text,
                start,
                length,
                hyphenated: op.is_hyphenation,
            },
            next_start,
            carry: op.prepend_hyphen,
        }
    }

    /// Breaks `text` into lines of at most `max_chars` characters. Newlines
    /// always end a line.
    pub fn wrap(&self, text: &str, max_chars: usize) -> Vec<WrappedLine> {
        let mut lines = Vec::new();
        let mut offset = 0;
        for paragraph in text.split('\n') {
            let chars: Vec<char> = paragraph.chars().collect();
            let mut start = 0;
            let mut carry = None;
            loop {
                let split = self.split_line(&chars, start, max_chars);
                let mut line = split.line;
                line.start += offset;
                if let Some(prefix) = carry {
                    line.text.insert(0, prefix);
                }
                lines.push(line);
                carry = split.carry;
                start = split.next_start;
                if start >= chars.len() {
                    break;
                }
            }
            offset += chars.len() + 1;
        }
        lines
    }
}
