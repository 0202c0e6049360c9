//! Comment stripping.
//!
//! Block comments (`/* */`) are removed before the source reaches the
//! grammar, so no parser has to account for them. Comment markers inside
//! quoted strings are left alone.

use crate::error::CssError;

/// Removes every block comment from `source`.
///
/// Fails with [`CssError::UnterminatedComment`] when a comment is still open
/// at the end of input.
pub fn strip_comments(source: &str) -> Result<String, CssError> {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.char_indices().peekable();
    let mut quote: Option<char> = None;

    while let Some((offset, c)) = chars.next() {
        if let Some(q) = quote {
            output.push(c);
            if c == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    output.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c == '/' && matches!(chars.peek(), Some((_, '*'))) {
            chars.next();
            let mut closed = false;
            while let Some((_, inner)) = chars.next() {
                if inner == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(CssError::UnterminatedComment { offset });
            }
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        output.push(c);
    }

    Ok(output)
}
