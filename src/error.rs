//! Conversion errors.

use thiserror::Error;

/// Errors raised while converting HTML or parsing configuration.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A rule's replacement ran on a node its filter would have rejected.
    #[error("rule `{rule}` invoked without a prior match: no matching anchor found")]
    NoMatchingAnchor { rule: &'static str },

    /// The configuration file is not valid TOML or has a bad field.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
