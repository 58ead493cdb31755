use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid hyphenation rule {0}")]
    InvalidRule(String),
    #[error("Invalid layout configuration: {0}")]
    Config(String),
}

pub mod config;
pub mod text;

pub use self::config::LayoutConfig;
pub use self::text::{
    HyphenationOpportunity, HyphenationStrategy, Hyphenator, RuleSet, WrappedLine, hyphenate_line,
};
