use crate::parser::{
    AttributeOperator, Combinator, ComplexSelector, CompoundSelector, NthExpr, PseudoClass,
    Selector, SelectorPart,
    values::{parse_ident, parse_string},
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    combinator::{map, opt, value},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};

/// Parses a simple selector: Type, `*`, .Class, #ID, `[attr]` or `:pseudo`.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        map(preceded(char(':'), parse_pseudo_class), Selector::PseudoClass),
        map(char('*'), |_| Selector::Universal),
        parse_attribute_selector,
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g., "Button.primary#submit").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    // No whitespace between simple selectors: `Button :first-child` is two compounds
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a complex selector with combinators (e.g., "Container > Button").
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current_compound) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let (rem, ws) = multispace0(input)?;

        let combinator_match: IResult<&str, Combinator> = alt((
            value(Combinator::Child, char('>')),
            value(Combinator::AdjacentSibling, char('+')),
            value(Combinator::GeneralSibling, char('~')),
        ))(rem);

        let (next, combinator) = match combinator_match {
            Ok((after_op, found)) => (multispace0(after_op)?.0, found),
            Err(_) if !ws.is_empty() => (rem, Combinator::Descendant),
            Err(_) => break,
        };

        match parse_compound_selector(next) {
            Ok((next_input, next_compound)) => {
                parts.push(SelectorPart::new(current_compound, combinator));
                current_compound = next_compound;
                input = next_input;
            }
            // Explicit combinator with nothing after it
            Err(e) if combinator != Combinator::Descendant => return Err(e),
            // Trailing whitespace before `{` or `,`
            Err(_) => break,
        }
    }

    parts.push(SelectorPart::new(current_compound, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}

/// Parses what follows the first `:`. Pseudo-elements (`::before`) and
/// functional pseudo-classes other than the nth forms (`:lang(en)`,
/// `:not(.x)`) are kept verbatim as [`PseudoClass::Other`].
fn parse_pseudo_class(input: &str) -> IResult<&str, PseudoClass> {
    let (input, element) = opt(char(':'))(input)?;
    let (input, name) = parse_ident(input)?;

    if element.is_some() {
        return Ok((input, PseudoClass::Other(format!(":{name}"))));
    }

    let pseudo = match name.to_ascii_lowercase().as_str() {
        "nth-child" => {
            let (input, expr) = parse_nth_argument(input)?;
            return Ok((input, PseudoClass::NthChild(expr)));
        }
        "nth-last-child" => {
            let (input, expr) = parse_nth_argument(input)?;
            return Ok((input, PseudoClass::NthLastChild(expr)));
        }
        "root" => PseudoClass::Root,
        "first-child" => PseudoClass::FirstChild,
        "last-child" => PseudoClass::LastChild,
        "only-child" => PseudoClass::OnlyChild,
        "empty" => PseudoClass::Empty,
        _ => {
            let (input, argument) = opt(take_parenthesized)(input)?;
            let raw = match argument {
                Some(argument) => format!("{name}({})", argument.trim()),
                None => name.to_string(),
            };
            return Ok((input, PseudoClass::Other(raw)));
        }
    };
    Ok((input, pseudo))
}

/// Consumes `( ... )` with nested parentheses and returns the contents.
/// Parentheses inside quoted strings do not count.
fn take_parenthesized(input: &str) -> IResult<&str, &str> {
    let (body, _) = char('(')(input)?;
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
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&body[i + 1..], &body[..i]));
                }
            }
            '{' | '}' | ';' => break,
            _ => {}
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

fn parse_nth_argument(input: &str) -> IResult<&str, NthExpr> {
    let (rest, raw) = delimited(char('('), take_until(")"), char(')'))(input)?;
    match NthExpr::parse(raw) {
        Some(expr) => Ok((rest, expr)),
        None => Err(nom::Err::Error(Error::new(input, ErrorKind::Verify))),
    }
}

fn parse_attribute_operator(input: &str) -> IResult<&str, AttributeOperator> {
    alt((
        value(AttributeOperator::Includes, tag("~=")),
        value(AttributeOperator::DashMatch, tag("|=")),
        value(AttributeOperator::Prefix, tag("^=")),
        value(AttributeOperator::Suffix, tag("$=")),
        value(AttributeOperator::Substring, tag("*=")),
        value(AttributeOperator::Equals, tag("=")),
    ))(input)
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, _) = pair(char('['), multispace0)(input)?;
    let (input, name) = parse_ident(input)?;
    let (input, _) = multispace0(input)?;
    let (input, matcher) = opt(pair(
        terminated(parse_attribute_operator, multispace0),
        alt((parse_string, map(parse_ident, str::to_string))),
    ))(input)?;
    let (input, _) = pair(multispace0, char(']'))(input)?;

    let (operator, value) = matcher.unwrap_or((AttributeOperator::Exists, String::new()));
    Ok((
        input,
        Selector::Attribute {
            name: name.to_string(),
            operator,
            value,
        },
    ))
}
