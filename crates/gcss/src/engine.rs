//! Selector matching over arbitrary trees.
//!
//! The engine never sees a concrete node type. Callers describe their tree
//! through [`NodeIface`], a table of traversal and query primitives, and the
//! engine walks it while testing selectors right to left.
//!
//! ## Node ownership
//!
//! Nodes returned by [`NodeIface::parent_node`], [`NodeIface::first_child`],
//! [`NodeIface::next_sibling`] and [`NodeIface::previous_sibling`] are handed
//! to the engine. The engine gives each one back through
//! [`NodeIface::release`] exactly once, as soon as it is done with it. The
//! node passed into [`SelectionEngine::matched_rulesets`] stays owned by the
//! caller and is never released by the engine.
//!
//! ## Ordering
//!
//! Matched rulesets are returned in ascending cascade order: by the
//! specificity of the best matching selector of each ruleset, then by source
//! order. A consumer applying them front to back lets later entries win.

use std::fmt;

use bitflags::bitflags;

use crate::parser::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, Selector, SelectorPart,
    Specificity, Statement, StyleSheet,
};

/// The traversal-primitive table a tree must provide to be matched.
pub trait NodeIface {
    /// Identity of a node for the lifetime of one matching run.
    type Node: Copy + Eq + fmt::Debug;

    fn parent_node(&self, node: Self::Node) -> Option<Self::Node>;
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;
    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node>;
    /// Name tested by type selectors.
    fn node_name(&self, node: Self::Node) -> String;
    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;
    fn children_count(&self, node: Self::Node) -> usize;
    /// Zero-based position among the node's siblings.
    fn index(&self, node: Self::Node) -> usize;
    /// Gives back a node obtained from one of the traversal primitives.
    fn release(&self, node: Self::Node);
}

bitflags! {
    /// Tree-position facts about a node, derived through the traversal
    /// primitives when a structural pseudo-class needs them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Node has no parent
        const ROOT        = 0b0000_0001;
        /// Node has no previous sibling
        const FIRST_CHILD = 0b0000_0010;
        /// Node has no next sibling
        const LAST_CHILD  = 0b0000_0100;
        /// Node has no children
        const EMPTY       = 0b0000_1000;
    }
}

/// Counters for one engine instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Complex selectors tested against a subject node.
    pub selectors_tested: usize,
    /// Nodes obtained through the traversal primitives.
    pub nodes_visited: usize,
}

/// A node obtained from a traversal primitive; released when dropped.
struct Held<'i, I: NodeIface + ?Sized> {
    iface: &'i I,
    node: I::Node,
}

impl<I: NodeIface + ?Sized> Drop for Held<'_, I> {
    fn drop(&mut self) {
        self.iface.release(self.node);
    }
}

#[derive(Debug)]
struct MatchedRule<'a> {
    specificity: Specificity,
    source_order: usize,
    statement: &'a Statement,
}

/// Matches stylesheets against nodes.
///
/// An engine carries only per-run counters; create one per query.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    stats: MatchStats,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    /// Returns every ruleset of `sheet` with a selector matching `node`, in
    /// ascending cascade order.
    pub fn matched_rulesets<'s, I>(
        &mut self,
        sheet: &'s StyleSheet,
        iface: &I,
        node: I::Node,
    ) -> Vec<&'s Statement>
    where
        I: NodeIface + ?Sized,
    {
        let mut matched = Vec::new();

        for (source_order, statement) in sheet.statements.iter().enumerate() {
            let Statement::Ruleset(ruleset) = statement else {
                continue;
            };

            let mut best: Option<Specificity> = None;
            for complex in &ruleset.selectors.selectors {
                if self.matches(iface, complex, node) {
                    let specificity = complex.specificity();
                    best = best.max(Some(specificity));
                }
            }

            if let Some(specificity) = best {
                matched.push(MatchedRule {
                    specificity,
                    source_order,
                    statement,
                });
            }
        }

        matched.sort_by(|a, b| {
            a.specificity
                .cmp(&b.specificity)
                .then(a.source_order.cmp(&b.source_order))
        });

        log::trace!(
            "MATCH: node={:?} rulesets={} stats={:?}",
            node,
            matched.len(),
            self.stats
        );

        matched.into_iter().map(|m| m.statement).collect()
    }

    /// Tests a single complex selector against `node`.
    pub fn matches<I>(&mut self, iface: &I, complex: &ComplexSelector, node: I::Node) -> bool
    where
        I: NodeIface + ?Sized,
    {
        self.stats.selectors_tested += 1;
        self.matches_parts(iface, &complex.parts, node)
    }

    fn fetch<'i, I>(&mut self, iface: &'i I, node: Option<I::Node>) -> Option<Held<'i, I>>
    where
        I: NodeIface + ?Sized,
    {
        let node = node?;
        self.stats.nodes_visited += 1;
        Some(Held { iface, node })
    }

    /// The last part must match `node`; the remaining parts are matched
    /// against related nodes according to the combinator joining them.
    fn matches_parts<I>(&mut self, iface: &I, parts: &[SelectorPart], node: I::Node) -> bool
    where
        I: NodeIface + ?Sized,
    {
        let Some((subject, rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_compound(iface, &subject.compound, node) {
            return false;
        }
        let Some(left) = rest.last() else {
            return true;
        };

        match left.combinator {
            Combinator::Child => match self.fetch(iface, iface.parent_node(node)) {
                Some(parent) => self.matches_parts(iface, rest, parent.node),
                None => false,
            },
            Combinator::AdjacentSibling => match self.fetch(iface, iface.previous_sibling(node)) {
                Some(sibling) => self.matches_parts(iface, rest, sibling.node),
                None => false,
            },
            Combinator::GeneralSibling => {
                let mut current = self.fetch(iface, iface.previous_sibling(node));
                while let Some(sibling) = current {
                    if self.matches_parts(iface, rest, sibling.node) {
                        return true;
                    }
                    current = self.fetch(iface, iface.previous_sibling(sibling.node));
                }
                false
            }
            Combinator::Descendant | Combinator::None => {
                let mut current = self.fetch(iface, iface.parent_node(node));
                while let Some(ancestor) = current {
                    if self.matches_parts(iface, rest, ancestor.node) {
                        return true;
                    }
                    current = self.fetch(iface, iface.parent_node(ancestor.node));
                }
                false
            }
        }
    }

    fn matches_compound<I>(&mut self, iface: &I, compound: &CompoundSelector, node: I::Node) -> bool
    where
        I: NodeIface + ?Sized,
    {
        let mut flags: Option<NodeFlags> = None;

        for selector in &compound.selectors {
            let matched = match selector {
                Selector::Type(name) => iface.node_name(node) == *name,
                Selector::Universal => true,
                Selector::Class(class) => iface
                    .attribute(node, "class")
                    .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class)),
                Selector::Id(id) => iface.attribute(node, "id").as_deref() == Some(id.as_str()),
                Selector::Attribute {
                    name,
                    operator,
                    value,
                } => iface
                    .attribute(node, name)
                    .is_some_and(|actual| operator.matches(&actual, value)),
                Selector::PseudoClass(pseudo) => {
                    self.matches_pseudo_class(iface, pseudo, node, &mut flags)
                }
            };
            if !matched {
                return false;
            }
        }
        true
    }

    fn matches_pseudo_class<I>(
        &mut self,
        iface: &I,
        pseudo: &PseudoClass,
        node: I::Node,
        flags: &mut Option<NodeFlags>,
    ) -> bool
    where
        I: NodeIface + ?Sized,
    {
        let required = match pseudo {
            PseudoClass::Root => NodeFlags::ROOT,
            PseudoClass::FirstChild => NodeFlags::FIRST_CHILD,
            PseudoClass::LastChild => NodeFlags::LAST_CHILD,
            PseudoClass::OnlyChild => NodeFlags::FIRST_CHILD | NodeFlags::LAST_CHILD,
            PseudoClass::Empty => NodeFlags::EMPTY,
            PseudoClass::NthChild(expr) => {
                return expr.matches(position(iface.index(node)));
            }
            PseudoClass::NthLastChild(expr) => {
                let count = match self.fetch(iface, iface.parent_node(node)) {
                    Some(parent) => iface.children_count(parent.node),
                    None => 1,
                };
                let from_end = count.saturating_sub(iface.index(node));
                return expr.matches(position(from_end.saturating_sub(1)));
            }
            PseudoClass::Other(_) => return false,
        };

        let flags = *flags.get_or_insert_with(|| self.node_flags(iface, node));
        flags.contains(required)
    }

    /// Computes the structural flags of `node`, releasing every node the
    /// primitives hand out along the way.
    pub fn node_flags<I>(&mut self, iface: &I, node: I::Node) -> NodeFlags
    where
        I: NodeIface + ?Sized,
    {
        let mut flags = NodeFlags::empty();
        if self.fetch(iface, iface.parent_node(node)).is_none() {
            flags |= NodeFlags::ROOT;
        }
        if self.fetch(iface, iface.previous_sibling(node)).is_none() {
            flags |= NodeFlags::FIRST_CHILD;
        }
        if self.fetch(iface, iface.next_sibling(node)).is_none() {
            flags |= NodeFlags::LAST_CHILD;
        }
        if self.fetch(iface, iface.first_child(node)).is_none() {
            flags |= NodeFlags::EMPTY;
        }
        flags
    }
}

/// Converts a zero-based index into the one-based position `an+b` counts.
fn position(index: usize) -> i32 {
    i32::try_from(index).map_or(i32::MAX, |i| i.saturating_add(1))
}
