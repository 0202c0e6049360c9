//! Object model produced by the parser.
//!
//! Every type here implements [`Display`](std::fmt::Display), which
//! serializes back to normalized CSS. The serialized form of a
//! [`Value`] is what property resolution hands out.

use std::fmt;

/// CSS specificity for determining rule precedence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl std::ops::Add for Specificity {
    type Output = Specificity;

    fn add(self, other: Specificity) -> Specificity {
        Specificity {
            ids: self.ids + other.ids,
            classes: self.classes + other.classes,
            types: self.types + other.types,
        }
    }
}

/// How an attribute selector compares the attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `[attr]`
    Exists,
    /// `[attr=value]`
    Equals,
    /// `[attr~=value]`, whitespace-separated token
    Includes,
    /// `[attr|=value]`, exact or followed by `-`
    DashMatch,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

impl AttributeOperator {
    /// Tests an attribute value against the selector's expected value.
    pub fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            AttributeOperator::Exists => true,
            AttributeOperator::Equals => actual == expected,
            AttributeOperator::Includes => {
                !expected.is_empty() && actual.split_ascii_whitespace().any(|t| t == expected)
            }
            AttributeOperator::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            AttributeOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttributeOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttributeOperator::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            AttributeOperator::Exists => "",
            AttributeOperator::Equals => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::DashMatch => "|=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
        }
    }
}

/// An `an+b` expression as used by `:nth-child()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NthExpr {
    pub a: i32,
    pub b: i32,
}

impl NthExpr {
    /// Largest magnitude accepted for `a` or `b` when parsing.
    pub const LIMIT: i32 = 1_000_000;

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parses `odd`, `even`, `7`, `2n`, `-n+3`, `2n + 1`.
    pub fn parse(raw: &str) -> Option<Self> {
        let expr: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match expr.as_str() {
            "odd" => return Some(Self::new(2, 1)),
            "even" => return Some(Self::new(2, 0)),
            "" => return None,
            _ => {}
        }

        let Some(idx) = expr.find('n') else {
            return Self::bounded(0, expr.parse().ok()?);
        };

        let a = match &expr[..idx] {
            "" | "+" => 1,
            "-" => -1,
            coefficient => coefficient.parse().ok()?,
        };
        let offset = &expr[idx + 1..];
        let b = if offset.is_empty() {
            0
        } else if offset.starts_with('+') || offset.starts_with('-') {
            offset.parse().ok()?
        } else {
            return None;
        };

        Self::bounded(a, b)
    }

    fn bounded(a: i32, b: i32) -> Option<Self> {
        let range = -Self::LIMIT..=Self::LIMIT;
        (range.contains(&a) && range.contains(&b)).then(|| Self::new(a, b))
    }

    /// Whether a 1-based position satisfies `a*n + b` for some `n >= 0`.
    pub fn matches(&self, position: i32) -> bool {
        let (a, b) = (i64::from(self.a), i64::from(self.b));
        let diff = i64::from(position) - b;
        if a == 0 {
            return diff == 0;
        }
        diff % a == 0 && diff / a >= 0
    }
}

impl fmt::Display for NthExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = match self.a {
            0 => return write!(f, "{}", self.b),
            1 => String::from("n"),
            -1 => String::from("-n"),
            a => format!("{a}n"),
        };
        if self.b == 0 {
            write!(f, "{a}")
        } else {
            write!(f, "{a}{:+}", self.b)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PseudoClass {
    Root,
    FirstChild,
    LastChild,
    OnlyChild,
    Empty,
    NthChild(NthExpr),
    NthLastChild(NthExpr),
    /// Parsed but never matched: state pseudo-classes like `:hover`,
    /// functional ones like `:lang(en)` or `:not(.x)`, and pseudo-elements.
    /// Holds the text after the first `:`, so `::before` is `":before"`.
    Other(String),
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoClass::Root => f.write_str(":root"),
            PseudoClass::FirstChild => f.write_str(":first-child"),
            PseudoClass::LastChild => f.write_str(":last-child"),
            PseudoClass::OnlyChild => f.write_str(":only-child"),
            PseudoClass::Empty => f.write_str(":empty"),
            PseudoClass::NthChild(expr) => write!(f, ":nth-child({expr})"),
            PseudoClass::NthLastChild(expr) => write!(f, ":nth-last-child({expr})"),
            PseudoClass::Other(name) => write!(f, ":{name}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Universal,
    Class(String),
    Id(String),
    Attribute {
        name: String,
        operator: AttributeOperator,
        value: String,
    },
    PseudoClass(PseudoClass),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => f.write_str(name),
            Selector::Universal => f.write_str("*"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Attribute {
                name,
                operator: AttributeOperator::Exists,
                ..
            } => write!(f, "[{name}]"),
            Selector::Attribute {
                name,
                operator,
                value,
            } => {
                write!(f, "[{name}{}", operator.symbol())?;
                write_quoted(f, value)?;
                f.write_str("]")
            }
            Selector::PseudoClass(pseudo) => write!(f, "{pseudo}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity::default();
        for s in &self.selectors {
            match s {
                Selector::Id(_) => spec.ids += 1,
                Selector::Class(_) | Selector::Attribute { .. } | Selector::PseudoClass(_) => {
                    spec.classes += 1;
                }
                Selector::Type(_) => spec.types += 1,
                Selector::Universal => {}
            }
        }
        spec
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selectors.iter().try_for_each(|s| write!(f, "{s}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    None,
    Descendant,
    Child,
    AdjacentSibling, // +
    GeneralSibling,  // ~
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Combinator::None => "",
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::AdjacentSibling => " + ",
            Combinator::GeneralSibling => " ~ ",
        })
    }
}

/// A compound selector and the combinator joining it to the part on its right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

/// Parts are stored left to right; the last part has [`Combinator::None`]
/// and is the one tested against the subject node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .map(|p| p.compound.specificity())
            .fold(Specificity::default(), |acc, x| acc + x)
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.parts
            .iter()
            .try_for_each(|p| write!(f, "{}{}", p.compound, p.combinator))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

/// A single component of a declaration value.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    Ident(String),
    /// A number with an optional unit; `%` is stored as the unit.
    Number {
        value: f64,
        unit: Option<String>,
    },
    Hash(String),
    String(String),
    Url(String),
    Function {
        name: String,
        args: Vec<Term>,
    },
    Comma,
    Slash,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Ident(ident) => f.write_str(ident),
            Term::Number { value, unit } => {
                write!(f, "{value}")?;
                if let Some(unit) = unit {
                    f.write_str(unit)?;
                }
                Ok(())
            }
            Term::Hash(hash) => write!(f, "#{hash}"),
            Term::String(s) => write_quoted(f, s),
            Term::Url(url) => write!(f, "url({url})"),
            Term::Function { name, args } => {
                write!(f, "{name}(")?;
                write_terms(f, args)?;
                f.write_str(")")
            }
            Term::Comma => f.write_str(","),
            Term::Slash => f.write_str("/"),
        }
    }
}

/// The value side of a declaration.
///
/// `Display` writes the normalized form, not the source text: numbers are
/// held as `f64`, so `1.50em` prints as `1.5em` and `+2` as `2`, and integers
/// beyond 2^53 lose precision. Whitespace collapses to single spaces and
/// strings are always double quoted. This is the text property resolution
/// returns.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub terms: Vec<Term>,
}

impl Value {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.terms)
    }
}

/// Terms are space separated, except that `,` hugs its left neighbour and
/// `/` hugs both.
fn write_terms(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    let mut previous: Option<&Term> = None;
    for term in terms {
        let separate = match (previous, term) {
            (None, _) => false,
            (_, Term::Comma | Term::Slash) => false,
            (Some(Term::Slash), _) => false,
            _ => true,
        };
        if separate {
            f.write_str(" ")?;
        }
        write!(f, "{term}")?;
        previous = Some(term);
    }
    Ok(())
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

/// A property-value pair like `color: red`.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: Value,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: Value, important: bool) -> Self {
        Self {
            property: property.into(),
            value,
            important,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

/// A selector list plus its declarations.
#[derive(Clone, Debug, PartialEq)]
pub struct Ruleset {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

impl Ruleset {
    pub fn new(selectors: SelectorList, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// Looks up a declaration by exact property name.
    ///
    /// When the block declares the property more than once, the later
    /// declaration is returned.
    pub fn declaration(&self, property: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selectors)?;
        for declaration in &self.declarations {
            writeln!(f, "  {declaration};")?;
        }
        f.write_str("}")
    }
}

/// An at-rule, kept verbatim. Its contents take no part in matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub prelude: String,
    pub block: Option<String>,
}

impl AtRule {
    pub fn new(name: impl Into<String>, prelude: impl Into<String>, block: Option<String>) -> Self {
        Self {
            name: name.into(),
            prelude: prelude.into(),
            block,
        }
    }
}

impl fmt::Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.prelude.is_empty() {
            write!(f, " {}", self.prelude)?;
        }
        match &self.block {
            Some(block) if block.is_empty() => f.write_str(" {}"),
            Some(block) => write!(f, " {{ {block} }}"),
            None => f.write_str(";"),
        }
    }
}

/// A top-level statement of a stylesheet.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Ruleset(Ruleset),
    AtRule(AtRule),
}

impl Statement {
    pub fn is_ruleset(&self) -> bool {
        matches!(self, Statement::Ruleset(_))
    }

    pub fn as_ruleset(&self) -> Option<&Ruleset> {
        match self {
            Statement::Ruleset(ruleset) => Some(ruleset),
            Statement::AtRule(_) => None,
        }
    }

    /// Declarations of a ruleset; at-rules have none.
    pub fn declarations(&self) -> &[Declaration] {
        match self {
            Statement::Ruleset(ruleset) => &ruleset.declarations,
            Statement::AtRule(_) => &[],
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Ruleset(ruleset) => write!(f, "{ruleset}"),
            Statement::AtRule(at_rule) => write!(f, "{at_rule}"),
        }
    }
}

/// A parsed stylesheet: statements in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    pub statements: Vec<Statement>,
}

impl StyleSheet {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn rulesets(&self) -> impl Iterator<Item = &Ruleset> {
        self.statements.iter().filter_map(Statement::as_ruleset)
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}
