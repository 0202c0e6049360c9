//! Error types for stylesheet construction and property resolution.

use gcss::CssError;
use thiserror::Error;

/// Errors surfaced by [`Stylesheet`](crate::Stylesheet) and the resolver.
///
/// A property that no rule declares is not an error; resolution returns
/// `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum StyleError {
    /// The stylesheet source could not be parsed. No handle was produced.
    #[error("CSS parse error: {0}")]
    Parse(#[from] CssError),

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),

    /// The caller broke the contract of the API: an empty property name, a
    /// host node without a name, or a node handle issued by another adapter.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

pub type Result<T> = std::result::Result<T, StyleError>;
