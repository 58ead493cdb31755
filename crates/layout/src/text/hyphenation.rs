//! Decides where an overflowing line of text should break, and whether the
//! break splits a word with a hyphen.
//!
//! All offsets and lengths are in characters, not bytes. A line is the text
//! from `start` up to `start + length`, where `length` is the caller's
//! proposed break: the number of characters that fit.

use super::rules::RuleSet;
use serde::{Deserialize, Serialize};

const NBSP: char = '\u{a0}';

/// How words may be split at the end of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HyphenationStrategy {
    /// Character appended to the first half of a split word.
    pub hyphen_append: Option<char>,
    /// Character placed at the start of the next line, before the second half.
    pub hyphen_prepend: Option<char>,
    /// Words with fewer characters than this are never split.
    pub min_word_length: usize,
    pub min_chars_before: usize,
    pub min_chars_after: usize,
    /// Dictionary of explicit break points, consulted before the generic rules.
    pub custom_rules: Option<RuleSet>,
}

impl Default for HyphenationStrategy {
    fn default() -> Self {
        Self {
            hyphen_append: Some('-'),
            hyphen_prepend: None,
            min_word_length: 5,
            min_chars_before: 2,
            min_chars_after: 3,
            custom_rules: None,
        }
    }
}

impl HyphenationStrategy {
    pub fn new(
        hyphen_append: Option<char>,
        hyphen_prepend: Option<char>,
        min_chars_before: usize,
        min_chars_after: usize,
    ) -> Self {
        Self {
            hyphen_append,
            hyphen_prepend,
            min_chars_before,
            min_chars_after,
            ..Self::default()
        }
    }

    /// Never splits words; lines only break on whitespace.
    pub fn none() -> Self {
        Self {
            hyphen_append: None,
            hyphen_prepend: None,
            min_word_length: usize::MAX,
            min_chars_before: 0,
            min_chars_after: 0,
            custom_rules: None,
        }
    }

    pub fn with_min_word_length(mut self, min_word_length: usize) -> Self {
        self.min_word_length = min_word_length;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.custom_rules = Some(rules);
        self
    }

    fn is_hyphen(&self, c: char) -> bool {
        Some(c) == self.hyphen_append || Some(c) == self.hyphen_prepend
    }
}

/// Where to break a line, and what to add around the break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HyphenationOpportunity {
    /// Characters from `start` that stay on this line. Zero means the whole
    /// run moves to the next line.
    pub new_length: usize,
    /// Whether a word was split.
    pub is_hyphenation: bool,
    pub append_hyphen: Option<char>,
    pub prepend_hyphen: Option<char>,
    /// Whether whitespace at the break should be dropped from the next line.
    pub remove_split_whitespace: bool,
}

impl HyphenationOpportunity {
    /// A break that splits a word.
    fn hyphenate(new_length: usize, append: Option<char>, prepend: Option<char>) -> Self {
        Self {
            new_length,
            is_hyphenation: true,
            append_hyphen: append,
            prepend_hyphen: prepend,
            remove_split_whitespace: false,
        }
    }

    /// A plain break with no hyphen.
    fn plain(new_length: usize, trim: bool) -> Self {
        Self {
            new_length,
            is_hyphenation: false,
            append_hyphen: None,
            prepend_hyphen: None,
            remove_split_whitespace: trim,
        }
    }
}

/// Whitespace that allows a line break. A non-breaking space does not.
pub fn is_word_break(c: char) -> bool {
    c.is_whitespace() && c != NBSP
}

/// Symbols that must not be split around: math, currency and modifier signs,
/// plus the common symbol blocks beyond Latin-1.
fn is_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~'
            | '¢' | '£' | '¤' | '¥' | '¦' | '§' | '¨' | '©' | '¬' | '®' | '¯'
            | '°' | '±' | '´' | '¸' | '×' | '÷'
            | '\u{20a0}'..='\u{20cf}'
            | '\u{2100}'..='\u{214f}'
            | '\u{2190}'..='\u{23ff}'
            | '\u{25a0}'..='\u{27bf}'
            | '\u{2b00}'..='\u{2bff}'
    )
}

fn is_protected(c: char, strategy: &HyphenationStrategy) -> bool {
    (is_symbol(c) && !strategy.is_hyphen(c)) || c.is_numeric()
}

/// Whether the word around the break contains digits or symbols.
fn touches_symbol_or_digit(chars: &[char], start: usize, length: usize, strategy: &HyphenationStrategy) -> bool {
    let split = start + length;
    for &c in chars[start..=split].iter().rev() {
        if is_protected(c, strategy) {
            return true;
        }
        if is_word_break(c) {
            break;
        }
    }
    for &c in chars.iter().skip(split + 1) {
        if is_protected(c, strategy) {
            return true;
        }
        if is_word_break(c) {
            break;
        }
    }
    false
}

enum WordLength {
    /// Long enough to split.
    Splittable,
    /// Too short, but a word boundary precedes it at this absolute offset.
    TooShortAfter(usize),
    /// Too short, and the word starts the run.
    TooShort,
}

fn word_length(chars: &[char], start: usize, length: usize, min_word_length: usize) -> WordLength {
    let mut count = 0usize;
    let mut boundary = None;
    let mut offset = start + length - 1;
    while offset > start {
        if is_word_break(chars[offset]) {
            boundary = Some(offset);
            break;
        }
        count += 1;
        offset -= 1;
    }
    if count > min_word_length {
        return WordLength::Splittable;
    }

    count += chars[start + length..]
        .iter()
        .take_while(|c| !is_word_break(**c))
        .count();
    if count >= min_word_length {
        return WordLength::Splittable;
    }
    match boundary {
        Some(offset) => WordLength::TooShortAfter(offset),
        None => WordLength::TooShort,
    }
}

/// The offset, relative to `start`, of the nearest whitespace or hyphen
/// character at or before `start + length`. The character at `start`
/// itself is never a boundary.
pub fn first_word_boundary_before(
    chars: &[char],
    start: usize,
    length: usize,
    hyphen_append: Option<char>,
    hyphen_prepend: Option<char>,
) -> Option<usize> {
    let last = chars.len().checked_sub(1)?;
    let mut offset = (start + length).min(last);
    while offset > start {
        let c = chars[offset];
        if is_word_break(c) || Some(c) == hyphen_append || Some(c) == hyphen_prepend {
            return Some(offset - start);
        }
        offset -= 1;
    }
    None
}

/// Checks that at least `min_chars` characters precede the proposed break
/// within its word.
///
/// Returns 0 when `proposed` itself is shorter than the minimum, the offset
/// of the whitespace when one is found within the minimum, or `proposed`.
/// A `proposed` break past the end of `chars` is clamped to the end.
pub fn split_for_left(chars: &[char], start: usize, proposed: usize, min_chars: usize) -> usize {
    let proposed = proposed.min(chars.len().saturating_sub(start));
    if proposed < min_chars || proposed == 0 {
        return 0;
    }
    let offset = start + proposed - 1;
    for i in 0..min_chars {
        if is_word_break(chars[offset - i]) {
            return offset - i - start;
        }
    }
    proposed
}

/// Checks that at least `min_chars` characters follow the proposed break
/// within its word.
///
/// Returns `proposed` when it is already fine, `proposed - 1` when the break
/// directly follows whitespace, the offset of the first whitespace inside the
/// minimum, or the end of the text. A break at or past the end of `chars` is
/// returned unchanged.
pub fn split_for_right(chars: &[char], start: usize, proposed: usize, min_chars: usize) -> usize {
    let offset = start + proposed;
    if offset >= chars.len() || offset == start {
        return proposed;
    }
    if is_word_break(chars[offset - 1]) {
        return proposed - 1;
    }
    for i in 0..min_chars {
        match chars.get(offset + i) {
            None => return chars.len() - start,
            Some(c) if is_word_break(*c) => return offset + i - start,
            Some(_) => {}
        }
    }
    proposed
}

/// The offset, relative to `start`, of an existing hyphen in the current word
/// that leaves enough characters on both sides.
fn existing_hyphen(chars: &[char], start: usize, length: usize, strategy: &HyphenationStrategy) -> Option<usize> {
    let split = start + length;
    let word_start = chars[start..split]
        .iter()
        .rposition(|c| is_word_break(*c))
        .map_or(start, |i| start + i + 1);
    let word_end = chars[split..]
        .iter()
        .position(|c| is_word_break(*c))
        .map_or(chars.len(), |i| split + i);

    (word_start + 1..=split)
        .rev()
        .filter(|&i| i < word_end && strategy.is_hyphen(chars[i]))
        .find(|&i| i - word_start >= strategy.min_chars_before && word_end - i - 1 >= strategy.min_chars_after)
        .map(|i| i - start)
}

/// Breaks at an explicit dictionary point inside the current word.
fn dictionary_break(
    chars: &[char],
    start: usize,
    length: usize,
    strategy: &HyphenationStrategy,
    rules: &RuleSet,
) -> Option<HyphenationOpportunity> {
    let split = start + length;
    let word_start = chars[start..split]
        .iter()
        .rposition(|c| !c.is_alphabetic())
        .map_or(start, |i| start + i + 1);
    let word_end = chars[split..]
        .iter()
        .position(|c| !c.is_alphabetic())
        .map_or(chars.len(), |i| split + i);
    if word_start >= split || word_end <= split {
        return None;
    }

    let word: String = chars[word_start..word_end].iter().collect();
    let breaks = rules.breaks_for(&word)?;
    let word_len = word_end - word_start;
    let chosen = breaks.iter().rev().copied().find(|&b| {
        word_start + b <= split && b >= strategy.min_chars_before && word_len - b >= strategy.min_chars_after
    });
    log::trace!("Dictionary word '{}' breaks at {:?}", word, chosen);

    Some(match chosen {
        Some(b) => HyphenationOpportunity::hyphenate(
            word_start + b - start,
            strategy.hyphen_append,
            strategy.hyphen_prepend,
        ),
        None => match first_word_boundary_before(chars, start, word_start - start, None, None) {
            Some(boundary) => HyphenationOpportunity::plain(boundary, true),
            None => HyphenationOpportunity::plain(0, false),
        },
    })
}

/// Finds the break for the run `text[start..]` given that `length`
/// characters fit on the line.
pub fn hyphenate_line(
    text: &str,
    start: usize,
    length: usize,
    strategy: &HyphenationStrategy,
) -> HyphenationOpportunity {
    let chars: Vec<char> = text.chars().collect();
    hyphenate_chars(&chars, start, length, strategy)
}

/// [`hyphenate_line`] over pre-split characters.
pub fn hyphenate_chars(
    chars: &[char],
    start: usize,
    length: usize,
    strategy: &HyphenationStrategy,
) -> HyphenationOpportunity {
    if start + length >= chars.len() {
        // Everything left fits.
        return HyphenationOpportunity::plain(chars.len().saturating_sub(start), false);
    }

    if let Some(rules) = strategy.custom_rules.as_ref().filter(|_| length > 0) {
        if let Some(opportunity) = dictionary_break(chars, start, length, strategy, rules) {
            return opportunity;
        }
    }

    if touches_symbol_or_digit(chars, start, length, strategy) {
        log::trace!("Break at {} touches a number or symbol", start + length);
        let boundary = first_word_boundary_before(chars, start, length, None, None).unwrap_or(0);
        return HyphenationOpportunity::plain(boundary, true);
    }

    if is_word_break(chars[start + length]) {
        return HyphenationOpportunity::plain(length, true);
    }
    if length == 0 {
        return HyphenationOpportunity::plain(0, false);
    }
    if is_word_break(chars[start + length - 1]) {
        return HyphenationOpportunity::plain(length - 1, true);
    }

    let min_length = strategy
        .min_word_length
        .max(strategy.min_chars_before.saturating_add(strategy.min_chars_after));
    match word_length(chars, start, length, min_length) {
        WordLength::Splittable => {}
        WordLength::TooShortAfter(boundary) => return HyphenationOpportunity::plain(boundary - start, true),
        WordLength::TooShort => return HyphenationOpportunity::plain(0, false),
    }

    // Room for the hyphen characters themselves.
    let min_after = strategy.min_chars_after + usize::from(strategy.hyphen_prepend.is_some());
    let min_before = strategy.min_chars_before + usize::from(strategy.hyphen_append.is_some());

    let right = split_for_right(chars, start, length, min_after);
    let end_of_text = chars.len() - start;

    if right == length {
        if let Some(hyphen) = existing_hyphen(chars, start, length, strategy) {
            log::trace!("Splitting on existing hyphen at {}", start + hyphen);
            return if strategy.hyphen_append.is_some() {
                HyphenationOpportunity::hyphenate(hyphen + 1, None, None)
            } else {
                HyphenationOpportunity::hyphenate(hyphen, None, None)
            };
        }

        let left = split_for_left(chars, start, length, min_before);
        if left == 0 {
            HyphenationOpportunity::plain(0, false)
        } else if left == length {
            HyphenationOpportunity::hyphenate(length, strategy.hyphen_append, strategy.hyphen_prepend)
        } else {
            HyphenationOpportunity::plain(left, true)
        }
    } else if right == end_of_text {
        // The last word runs to the end of the text.
        match first_word_boundary_before(
            chars,
            start,
            end_of_text - 1,
            strategy.hyphen_append,
            strategy.hyphen_prepend,
        ) {
            Some(left) => HyphenationOpportunity::plain(left, true),
            None if length > min_before + min_after => HyphenationOpportunity::hyphenate(
                end_of_text - min_after,
                strategy.hyphen_append,
                strategy.hyphen_prepend,
            ),
            None => HyphenationOpportunity::plain(0, false),
        }
    } else if right + 1 == length {
        HyphenationOpportunity::plain(right, true)
    } else {
        // Too few characters after the break: move it back.
        let Some(left) =
            first_word_boundary_before(chars, start, length, strategy.hyphen_append, strategy.hyphen_prepend)
        else {
            return HyphenationOpportunity::plain(0, false);
        };
        let at_left = chars[start + left];
        if right - left >= min_before + min_after {
            HyphenationOpportunity::hyphenate(right - min_after, strategy.hyphen_append, strategy.hyphen_prepend)
        } else if Some(at_left) == strategy.hyphen_append {
            HyphenationOpportunity::hyphenate(left + 1, None, None)
        } else if Some(at_left) == strategy.hyphen_prepend {
            HyphenationOpportunity::hyphenate(left, None, None)
        } else {
            HyphenationOpportunity::plain(left, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox";

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn strategy(before: usize, after: usize) -> HyphenationStrategy {
        HyphenationStrategy::new(Some('-'), None, before, after)
    }

    /// The line text as the caller would render it.
    fn rendered(text: &str, start: usize, op: &HyphenationOpportunity) -> String {
        let mut line: String = text.chars().skip(start).take(op.new_length).collect();
        if let Some(c) = op.append_hyphen {
            line.push(c);
        }
        line
    }

    #[test]
    fn test_hyphenates_inside_long_enough_word() {
        let op = hyphenate_line(FOX, 0, 13, &strategy(2, 2));
        assert!(op.is_hyphenation);
        assert_eq!(op.new_length, 13);
        assert_eq!(op.append_hyphen, Some('-'));
        assert_eq!(op.prepend_hyphen, None);
        assert!(!op.remove_split_whitespace);
        assert_eq!(rendered(FOX, 0, &op), "The quick bro-");
    }

    #[test]
    fn test_moves_break_left_when_too_few_after() {
        let op = hyphenate_line(FOX, 0, 14, &strategy(2, 2));
        assert!(op.is_hyphenation);
        assert_eq!(rendered(FOX, 0, &op), "The quick bro-");

        let op = hyphenate_line(FOX, 0, 14, &strategy(3, 2));
        assert!(op.is_hyphenation);
        assert_eq!(op.new_length, 13);
    }

    #[test]
    fn test_short_word_falls_back_to_boundary() {
        for length in [12, 13] {
            let op = hyphenate_line(FOX, 0, length, &strategy(3, 3));
            assert!(!op.is_hyphenation);
            assert_eq!(op.new_length, 9);
            assert!(op.remove_split_whitespace);
            assert_eq!(op.append_hyphen, None);
        }
    }

    #[test]
    fn test_first_word_too_short_moves_whole_run() {
        let op = hyphenate_line(FOX, 0, 2, &strategy(2, 2));
        assert_eq!(op, HyphenationOpportunity::plain(0, false));
    }

    #[test]
    fn test_breaks_on_and_after_space() {
        let on = hyphenate_line(FOX, 0, 15, &strategy(3, 3));
        let after = hyphenate_line(FOX, 0, 16, &strategy(3, 3));
        for op in [on, after] {
            assert!(!op.is_hyphenation);
            assert_eq!(op.new_length, 15);
            assert!(op.remove_split_whitespace);
        }
    }

    #[test]
    fn test_word_without_spaces() {
        let text = "Thequickbrownfox";
        let op = hyphenate_line(text, 0, 12, &strategy(3, 3));
        assert!(op.is_hyphenation);
        assert_eq!(rendered(text, 0, &op), "Thequickbrow-");

        let op = hyphenate_line(text, 0, 14, &strategy(3, 3));
        assert!(op.is_hyphenation);
        assert_eq!(rendered(text, 0, &op), "Thequickbrown-");
    }

    #[test]
    fn test_existing_hyphen_is_preferred() {
        let text = "The quick-brown fox";
        let op = hyphenate_line(text, 0, 14, &strategy(3, 3));
        assert!(op.is_hyphenation);
        assert_eq!(op.append_hyphen, None);
        assert!(!op.remove_split_whitespace);
        assert_eq!(rendered(text, 0, &op), "The quick-");

        let text = "The qui-ckbrown fox";
        let op = hyphenate_line(text, 0, 12, &strategy(3, 3));
        assert!(op.is_hyphenation);
        assert_eq!(op.append_hyphen, None);
        assert_eq!(rendered(text, 0, &op), "The qui-");
    }

    #[test]
    fn test_existing_hyphen_adds_no_prepend() {
        let both = HyphenationStrategy::new(Some('-'), Some('-'), 3, 3);
        let op = hyphenate_line("The quick-brown fox", 0, 14, &both);
        assert!(op.is_hyphenation);
        assert_eq!(op.new_length, 10);
        assert_eq!(op.append_hyphen, None);
        assert_eq!(op.prepend_hyphen, None);
    }

    #[test]
    fn test_split_for_left_clamps_past_end() {
        let c: Vec<char> = "brown".chars().collect();
        assert_eq!(split_for_left(&c, 0, 9, 2), 5);
        assert_eq!(split_for_left(&c, 3, 9, 3), 0);
        assert_eq!(split_for_left(&c, 7, 2, 1), 0);
    }

    #[test]
    fn test_numbers_and_symbols_are_not_split() {
        let text = "The quick -1.234 fox";
        let op = hyphenate_line(text, 0, 14, &strategy(3, 3));
        assert!(!op.is_hyphenation);
        assert!(op.remove_split_whitespace);
        assert_eq!(rendered(text, 0, &op), "The quick");

        let text = "The quick brow$n fox";
        let op = hyphenate_line(text, 0, 13, &strategy(3, 3));
        assert!(!op.is_hyphenation);
        assert_eq!(op.new_length, 9);
    }

    #[test]
    fn test_prepend_hyphen_reserves_room_after() {
        let op = hyphenate_line(FOX, 0, 13, &HyphenationStrategy::new(Some('-'), Some('-'), 2, 2));
        assert!(op.is_hyphenation);
        assert_eq!(op.prepend_hyphen, Some('-'));
        assert_eq!(op.new_length, 12);
    }

    #[test]
    fn test_whole_run_fits() {
        let op = hyphenate_line(FOX, 4, 15, &strategy(2, 2));
        assert_eq!(op.new_length, 15);
        assert!(!op.is_hyphenation);
    }

    #[test]
    fn test_none_strategy_breaks_on_words_only() {
        let op = hyphenate_line(FOX, 0, 13, &HyphenationStrategy::none());
        assert!(!op.is_hyphenation);
        assert_eq!(op.new_length, 9);
    }

    #[test]
    fn test_multibyte_text_uses_char_offsets() {
        let text = "Thé qüick bröwn fox";
        let op = hyphenate_line(text, 0, 13, &strategy(2, 2));
        assert!(op.is_hyphenation);
        assert_eq!(rendered(text, 0, &op), "Thé qüick brö-");
    }

    #[test]
    fn test_nbsp_does_not_break() {
        assert!(is_word_break(' '));
        assert!(is_word_break('\t'));
        assert!(!is_word_break('\u{a0}'));
    }

    #[test]
    fn test_split_for_left() {
        let c = chars(FOX);
        assert_eq!(split_for_left(&c, 0, 13, 3), 13);
        assert_eq!(split_for_left(&c, 0, 14, 3), 14);
        assert_eq!(split_for_left(&c, 0, 12, 3), 9);
        assert_eq!(split_for_left(&c, 0, 10, 3), 9);
        assert_eq!(split_for_left(&c, 0, 3, 3), 3);
        assert_eq!(split_for_left(&c, 0, 2, 3), 0);
        assert_eq!(split_for_left(&c, 0, 14, 6), 9);

        let word = chars("ALongWordWithoutSpaces");
        assert_eq!(split_for_left(&word, 0, 17, 3), 17);
    }

    #[test]
    fn test_split_for_left_mid_string() {
        let c = chars("THE QUICK BROWN FOX. The quick brown fox");
        let start = 21;
        assert_eq!(split_for_left(&c, start, 13, 3), 13);
        assert_eq!(split_for_left(&c, start, 12, 3), 9);
        assert_eq!(split_for_left(&c, start, 2, 3), 0);
    }

    #[test]
    fn test_split_for_right() {
        let c = chars(FOX);
        assert_eq!(split_for_right(&c, 0, 12, 3), 12);
        assert_eq!(split_for_right(&c, 0, 11, 3), 11);
        assert_eq!(split_for_right(&c, 0, 13, 3), 15);
        assert_eq!(split_for_right(&c, 0, 14, 3), 15);
        assert_eq!(split_for_right(&c, 0, 15, 3), 15);
        assert_eq!(split_for_right(&c, 0, 16, 3), 15);
        assert_eq!(split_for_right(&c, 0, 18, 3), 19);

        let word = chars("ALongWordWithoutSpaces");
        assert_eq!(split_for_right(&word, 0, 17, 6), 22);
    }

    #[test]
    fn test_first_word_boundary_before() {
        let c = chars(FOX);
        assert_eq!(first_word_boundary_before(&c, 0, 18, None, None), Some(15));

        let c = chars("The quickbrownfox");
        assert_eq!(first_word_boundary_before(&c, 0, 16, None, None), Some(3));

        let c = chars("THE QUICK BROWN FOX. The quickbrownfox");
        assert_eq!(first_word_boundary_before(&c, 21, c.len() - 1, None, None), Some(3));

        let c = chars("The quick brown fox. THE QUICK BROWN FOX");
        assert_eq!(first_word_boundary_before(&c, 0, 20, None, None), Some(20));

        let c = chars("Thequickbrownfox");
        assert_eq!(first_word_boundary_before(&c, 0, 15, None, None), None);
        assert_eq!(first_word_boundary_before(&c, 0, 15, Some('q'), None), Some(3));
    }

    #[test]
    fn test_dictionary_breaks() {
        let rules = RuleSet::from_patterns(["hy-phen-ation"]).unwrap();
        let strategy = strategy(2, 3).with_rules(rules);
        let text = "Good hyphenation rules";
        // "Good hyphenat" fits; the nearest dictionary point is after "hyphen".
        let op = hyphenate_line(text, 0, 13, &strategy);
        assert!(op.is_hyphenation);
        assert_eq!(rendered(text, 0, &op), "Good hyphen-");

        // Only "hy" fits, which leaves too little before the break.
        let op = hyphenate_line(text, 0, 6, &HyphenationStrategy {
            min_chars_before: 3,
            ..strategy.clone()
        });
        assert!(!op.is_hyphenation);
        assert_eq!(op.new_length, 4);
    }

    #[test]
    fn test_strategy_serde_defaults() {
        let strategy: HyphenationStrategy =
            serde_json::from_str(r#"{ "minCharsBefore": 3, "customRules": ["ex-am-ple"] }"#).unwrap();
        assert_eq!(strategy.min_chars_before, 3);
        assert_eq!(strategy.min_chars_after, 3);
        assert_eq!(strategy.hyphen_append, Some('-'));
        assert!(strategy.custom_rules.is_some());
    }
}
