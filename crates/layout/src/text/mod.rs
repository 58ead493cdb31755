pub mod hyphenation;
pub mod rules;
pub mod wrapper;

pub use hyphenation::{
    HyphenationOpportunity, HyphenationStrategy, first_word_boundary_before, hyphenate_chars,
    hyphenate_line, split_for_left, split_for_right,
};
pub use rules::RuleSet;
pub use wrapper::{Hyphenator, LineSplit, WrappedLine};
