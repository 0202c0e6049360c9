//! The stylesheet handle.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use gcss::parser::{Ruleset, parse_stylesheet, parse_stylesheet_bytes};
use gcss::{ParserOptions, StyleSheet};

use crate::error::{Result, StyleError};
use crate::resolver;
use crate::styleable::Styleable;

/// A parsed, immutable stylesheet.
///
/// Construction either yields a complete handle or fails; there is no
/// partially parsed state. Queries never modify the handle, so one handle
/// can serve any number of trees.
#[derive(Clone, Debug, PartialEq)]
pub struct Stylesheet {
    sheet: StyleSheet,
}

impl Stylesheet {
    /// Parses CSS source text as ASCII.
    pub fn from_source(source: &str) -> Result<Self> {
        let sheet = parse_stylesheet(source)?;
        Ok(Self { sheet })
    }

    /// Parses raw bytes with explicit options.
    pub fn from_bytes(bytes: &[u8], options: &ParserOptions) -> Result<Self> {
        let sheet = parse_stylesheet_bytes(bytes, options)?;
        Ok(Self { sheet })
    }

    /// Reads and parses a stylesheet file with the default options.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let result = Self::from_bytes(&bytes, &ParserOptions::default());
        log::debug!(
            "load {}: ok={} length={}",
            path.display(),
            result.is_ok(),
            bytes.len()
        );
        result
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn rules(&self) -> impl Iterator<Item = &Ruleset> {
        self.sheet.rulesets()
    }

    /// Resolves `property` for `node`; see [`resolver::get_property`].
    pub fn get_property<N: Styleable>(&self, node: &N, property: &str) -> Result<Option<String>> {
        resolver::resolve(&self.sheet, node, property)
    }

    /// Every property the cascade assigns to `node`, by name.
    pub fn computed_properties<N: Styleable>(&self, node: &N) -> Result<BTreeMap<String, String>> {
        resolver::computed_properties(&self.sheet, node)
    }

    /// The rulesets matching `node`, in cascade order.
    pub fn matched_rules<N: Styleable>(&self, node: &N) -> Result<Vec<&Ruleset>> {
        let matched = resolver::matched_statements(&self.sheet, node)?;
        Ok(matched
            .into_iter()
            .filter_map(|statement| statement.as_ruleset())
            .collect())
    }
}

impl FromStr for Stylesheet {
    type Err = StyleError;

    fn from_str(source: &str) -> Result<Self> {
        Self::from_source(source)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.sheet, f)
    }
}
