//! Error types for CSS parsing.
//!
//! Parsing is all-or-nothing: any of these errors means no stylesheet was
//! produced.

use thiserror::Error;

/// Errors that can occur while parsing a stylesheet.
///
/// # Examples
///
/// ```rust
/// use gcss::parser::parse_stylesheet;
///
/// // Unterminated block
/// let result = parse_stylesheet("Button { color: red;");
/// assert!(result.is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CssError {
    /// Invalid CSS syntax was encountered during parsing.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("CSS syntax error: {0}")]
    InvalidSyntax(String),

    /// A `/*` comment was opened but never closed.
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    /// The source contains a byte that the selected charset does not allow.
    #[error("invalid byte for charset at offset {offset}")]
    Encoding { offset: usize },
}
