//! Value parsing for declarations.
//!
//! A declaration value is parsed into a flat list of [`Term`]s:
//!
//! - Identifiers: `red`, `solid`, `-moz-box`
//! - Numbers with optional unit: `1`, `1.5em`, `-2px`, `50%`
//! - Hash tokens: `#fff`, `#1e1e1e`
//! - Strings: `"Helvetica Neue"`, `'a'`
//! - URLs: `url(image.png)`, `url("image.png")`
//! - Functions: `rgb(1, 2, 3)`, `calc(100% - 2px)`
//! - Operators: `,` and `/`
//!
//! No term is interpreted; the engine only needs to carry values through
//! the cascade and serialize them back.

use crate::parser::stylesheet::Term;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{map, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, preceded, tuple},
};

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
///
/// Identifiers are used for property names, type selectors, class names, etc.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Parses a single- or double-quoted string, resolving backslash escapes.
pub fn parse_string(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('"' | '\''))) => q,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };

    let mut out = String::new();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            c if c == quote => return Ok((&input[i + c.len_utf8()..], out)),
            '\n' => break,
            c => out.push(c),
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

/// Parses a number with an optional unit or percent sign.
fn parse_number(input: &str) -> IResult<&str, Term> {
    let (rest, raw) = recognize(pair(
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
    ))(input)?;

    let value: f64 = raw
        .parse()
        .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Float)))?;
    let (rest, unit) = opt(alt((tag("%"), parse_ident)))(rest)?;

    Ok((
        rest,
        Term::Number {
            value,
            unit: unit.map(str::to_string),
        },
    ))
}

/// Parses `name(args)`, `url(...)`, or a bare identifier.
fn parse_function_or_ident(input: &str) -> IResult<&str, Term> {
    let (rest, name) = parse_ident(input)?;

    let open: IResult<&str, char> = char('(')(rest);
    let Ok((after_open, _)) = open else {
        return Ok((rest, Term::Ident(name.to_string())));
    };

    if name.eq_ignore_ascii_case("url") {
        let (after_ws, _) = multispace0(after_open)?;
        if !after_ws.starts_with('"') && !after_ws.starts_with('\'') {
            let (after, raw) = take_until(")")(after_ws)?;
            return Ok((&after[1..], Term::Url(raw.trim().to_string())));
        }
    }

    let (after, args) = parse_terms(after_open)?;
    let (after, _) = preceded(multispace0, char(')'))(after)?;
    Ok((
        after,
        Term::Function {
            name: name.to_string(),
            args,
        },
    ))
}

/// Parses one value term.
pub fn parse_term(input: &str) -> IResult<&str, Term> {
    alt((
        map(char(','), |_| Term::Comma),
        map(char('/'), |_| Term::Slash),
        map(parse_string, Term::String),
        map(preceded(char('#'), parse_ident), |h| Term::Hash(h.to_string())),
        parse_number,
        parse_function_or_ident,
    ))(input)
}

/// Parses a whitespace separated run of terms. Stops at the first input that
/// is not a term (`;`, `}`, `)`, `!`).
pub fn parse_terms(input: &str) -> IResult<&str, Vec<Term>> {
    many0(preceded(multispace0, parse_term))(input)
}

/// Parses the `!important` suffix of a declaration.
pub fn parse_important(input: &str) -> IResult<&str, bool> {
    map(
        opt(tuple((
            multispace0,
            char('!'),
            multispace0,
            nom::bytes::complete::tag_no_case("important"),
        ))),
        |found| found.is_some(),
    )(input)
}
