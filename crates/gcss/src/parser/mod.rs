//! CSS parsing and stylesheet data structures.
//!
//! This module provides the parsing side of the engine:
//!
//! - [`parse_stylesheet`]: Main entry point for parsing CSS source
//! - [`parse_stylesheet_bytes`]: Same, from raw bytes under a [`Charset`]
//! - [`StyleSheet`]: Statements in source order
//! - [`Ruleset`]: A selector list with declarations
//! - [`Declaration`]: A property-value pair like `color: red`
//!
//! ## Submodules
//!
//! - [`comments`]: Block comment stripping
//! - [`selectors`]: Selector parsing (type, class, ID, attributes, combinators)
//! - [`stylesheet`]: Object model for statements, selectors and values
//! - [`values`]: Declaration value terms
//!
//! Parsing is strict. Any syntax error fails the whole stylesheet.
//!
//! ## Example
//!
//! ```rust
//! use gcss::parser::{parse_stylesheet, Selector};
//!
//! let stylesheet = parse_stylesheet("Button { color: red; }").unwrap();
//! let ruleset = stylesheet.rulesets().next().unwrap();
//!
//! assert_eq!(
//!     ruleset.selectors.selectors[0].parts[0].compound.selectors[0],
//!     Selector::Type("Button".to_string())
//! );
//! assert_eq!(ruleset.declarations[0].value.to_string(), "red");
//! ```

pub mod comments;
pub mod selectors;
pub mod stylesheet;
pub mod values;

pub use crate::parser::comments::strip_comments;
pub use crate::parser::stylesheet::{
    AtRule, AttributeOperator, Combinator, ComplexSelector, CompoundSelector, Declaration,
    NthExpr, PseudoClass, Ruleset, Selector, SelectorList, SelectorPart, Specificity, Statement,
    StyleSheet, Term, Value,
};

use crate::CssError;
use crate::parser::selectors::parse_complex_selector;
use crate::parser::values::{parse_ident, parse_important, parse_terms};

use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_till,
    character::complete::{char, multispace0},
    combinator::map,
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{preceded, tuple},
};

/// Character set used to decode stylesheet bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    /// Single-byte ASCII; any byte above `0x7f` is rejected.
    #[default]
    Ascii,
    /// UTF-8.
    Utf8,
}

/// Options controlling how a stylesheet is read.
#[derive(Clone, Debug, Default)]
pub struct ParserOptions {
    pub charset: Charset,
}

impl ParserOptions {
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

/// Parses a full stylesheet with the default (ASCII) options.
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet, CssError> {
    parse_stylesheet_bytes(source.as_bytes(), &ParserOptions::default())
}

/// Parses a stylesheet from raw bytes.
pub fn parse_stylesheet_bytes(
    bytes: &[u8],
    options: &ParserOptions,
) -> Result<StyleSheet, CssError> {
    let source = decode(bytes, options.charset)?;
    let clean_source = strip_comments(source)?;

    let (remaining, statements) = many0(parse_statement)(clean_source.as_str())
        .map_err(|e| CssError::InvalidSyntax(e.to_string()))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        let excerpt: String = remaining.chars().take(40).collect();
        return Err(CssError::InvalidSyntax(format!(
            "Unexpected tokens in stylesheet: {excerpt}"
        )));
    }

    log::debug!(
        "parsed stylesheet: {} statements from {} bytes",
        statements.len(),
        bytes.len()
    );
    Ok(StyleSheet::new(statements))
}

fn decode(bytes: &[u8], charset: Charset) -> Result<&str, CssError> {
    if charset == Charset::Ascii {
        if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(CssError::Encoding { offset });
        }
    }
    std::str::from_utf8(bytes).map_err(|e| CssError::Encoding {
        offset: e.valid_up_to(),
    })
}

/// Parses one top-level statement: an at-rule or a ruleset.
pub fn parse_statement(input: &str) -> IResult<&str, Statement> {
    preceded(
        multispace0,
        alt((
            map(parse_at_rule, Statement::AtRule),
            map(parse_ruleset, Statement::Ruleset),
        )),
    )(input)
}

/// Parses a ruleset (e.g., "Button { color: red; }").
pub fn parse_ruleset(input: &str) -> IResult<&str, Ruleset> {
    let (input, selectors) = parse_selector_list(input)?;
    let (input, _) = multispace0(input)?;
    let (input, declarations) = parse_declaration_block(input)?;

    Ok((input, Ruleset::new(selectors, declarations)))
}

/// Parses `@name prelude;` or `@name prelude { ... }`, keeping the block raw.
pub fn parse_at_rule(input: &str) -> IResult<&str, AtRule> {
    let (input, name) = preceded(char('@'), parse_ident)(input)?;
    let (input, prelude) = take_till(|c| c == ';' || c == '{' || c == '}')(input)?;
    let (input, block) = alt((map(char(';'), |_| None), map(take_balanced_block, Some)))(input)?;

    Ok((
        input,
        AtRule::new(name, prelude.trim(), block.map(|b| b.trim().to_string())),
    ))
}

/// Parses a comma-separated list of selectors (e.g., "Button, .primary").
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_complex_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_complex_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

/// Parses a `{ ... }` declaration block. Empty declarations (`;;`) are
/// allowed and the final `;` is optional.
pub fn parse_declaration_block(input: &str) -> IResult<&str, Vec<Declaration>> {
    let (mut input, _) = char('{')(input)?;
    let mut declarations = Vec::new();

    loop {
        let (rest, _) = multispace0(input)?;

        let closing: IResult<&str, char> = char('}')(rest);
        if let Ok((after, _)) = closing {
            return Ok((after, declarations));
        }
        let separator: IResult<&str, char> = char(';')(rest);
        if let Ok((after, _)) = separator {
            input = after;
            continue;
        }

        let (rest, declaration) = parse_declaration(rest)?;
        declarations.push(declaration);

        // A declaration must be followed by `;` or the end of the block
        let (rest, _) = multispace0(rest)?;
        if !rest.starts_with(';') && !rest.starts_with('}') {
            return Err(nom::Err::Error(Error::new(rest, ErrorKind::Char)));
        }
        input = rest;
    }
}

/// Parses `property: value [!important]`, without the trailing `;`.
pub fn parse_declaration(input: &str) -> IResult<&str, Declaration> {
    let (input, _) = multispace0(input)?;
    let (input, property) = parse_ident(input)?;
    let (input, _) = tuple((multispace0, char(':'), multispace0))(input)?;
    let (after_terms, terms) = parse_terms(input)?;

    if terms.is_empty() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }

    let (input, important) = parse_important(after_terms)?;
    Ok((input, Declaration::new(property, Value::new(terms), important)))
}

/// Consumes a `{ ... }` block with balanced braces and returns its contents.
/// Braces inside quoted strings do not count.
fn take_balanced_block(input: &str) -> IResult<&str, &str> {
    let (body, _) = char('{')(input)?;
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&body[i + 1..], &body[..i]));
                }
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}
