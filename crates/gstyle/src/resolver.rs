//! Property resolution: matched rulesets in, one value out.
//!
//! Each query runs against a fresh [`SelectionEngine`] and a fresh
//! [`NodeAdapter`]. Nothing survives the call except the returned value, and
//! every node handed out during matching is given back before returning.

use std::collections::BTreeMap;

use gcss::parser::{Declaration, Statement};
use gcss::{NodeIface, SelectionEngine, StyleSheet};

use crate::adapter::NodeAdapter;
use crate::error::{Result, StyleError};
use crate::styleable::Styleable;
use crate::stylesheet::Stylesheet;

/// Resolves `property` for `node`.
///
/// The matched rulesets are scanned in cascade order and the last one that
/// declares `property` wins. Rulesets that match but do not declare it are
/// skipped. A property no rule declares resolves to `Ok(None)`.
pub fn get_property<N: Styleable>(
    stylesheet: &Stylesheet,
    node: &N,
    property: &str,
) -> Result<Option<String>> {
    resolve(stylesheet.sheet(), node, property)
}

/// [`get_property`] against a bare parsed sheet.
pub fn resolve<N: Styleable>(sheet: &StyleSheet, node: &N, property: &str) -> Result<Option<String>> {
    if property.is_empty() {
        return Err(StyleError::ContractViolation(
            "property name must not be empty".to_string(),
        ));
    }

    let matched = matched_statements(sheet, node)?;
    let value = last_declared(&matched, property).map(|decl| decl.value.to_string());

    log::trace!(
        "RESOLVE: node={} property={} matched={} value={:?}",
        node.node_name(),
        property,
        matched.len(),
        value
    );
    Ok(value)
}

/// Every property declared by a ruleset matching `node`, each resolved the
/// way [`resolve`] would.
pub fn computed_properties<N: Styleable>(
    sheet: &StyleSheet,
    node: &N,
) -> Result<BTreeMap<String, String>> {
    let matched = matched_statements(sheet, node)?;

    let mut computed = BTreeMap::new();
    for declaration in matched.iter().flat_map(|s| s.declarations()) {
        computed.insert(declaration.property.clone(), declaration.value.to_string());
    }
    Ok(computed)
}

/// Runs the engine for `node` and returns the matched rulesets in cascade
/// order, with every adapted node released.
pub(crate) fn matched_statements<'s, N: Styleable>(
    sheet: &'s StyleSheet,
    node: &N,
) -> Result<Vec<&'s Statement>> {
    if node.node_name().is_empty() {
        return Err(StyleError::ContractViolation(format!(
            "node {:?} has an empty name",
            node.node_key()
        )));
    }

    let mut engine = SelectionEngine::new();
    let adapter = NodeAdapter::new();

    let root = adapter.adapt(node);
    let matched = engine.matched_rulesets(sheet, &adapter, root);
    adapter.release(root);

    let stats = adapter.stats();
    if stats.outstanding() != 0 {
        log::warn!(
            "unbalanced query on {:?}: {} adapted, {} released",
            node.node_key(),
            stats.adaptations,
            stats.releases
        );
    }
    log::trace!(
        "MATCHED: node={} rulesets={} engine={:?} adapter={:?}",
        node.node_name(),
        matched.len(),
        engine.stats(),
        stats
    );

    Ok(matched)
}

/// The declaration of `property` in the last statement that has one.
fn last_declared<'s>(matched: &[&'s Statement], property: &str) -> Option<&'s Declaration> {
    matched
        .iter()
        .rev()
        .filter_map(|statement| statement.as_ruleset())
        .find_map(|ruleset| ruleset.declaration(property))
}
