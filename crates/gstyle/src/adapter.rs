//! Bridges host nodes to the selection engine.
//!
//! A [`NodeAdapter`] is one instance of the traversal-primitive table. It
//! keeps a side table from host node identity to an adapter record, so
//! adapting the same host node twice yields the same [`NodeHandle`]. The
//! engine relies on that to compare nodes.
//!
//! Every handle the adapter gives out retains the host node through
//! [`Styleable::retain`]; [`NodeIface::release`] gives it back. Records live
//! as long as the adapter, which is scoped to a single query.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use gcss::NodeIface;

use crate::error::{Result, StyleError};
use crate::styleable::Styleable;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies the adapter that issued a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceToken(u64);

impl InterfaceToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// An adapted host node, as seen by the engine.
///
/// Handles compare equal exactly when they refer to the same adapter record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    token: InterfaceToken,
    slot: usize,
}

impl NodeHandle {
    pub fn token(&self) -> InterfaceToken {
        self.token
    }
}

#[derive(Debug)]
struct AdapterRecord<N> {
    host: N,
    handed_out: usize,
    released: usize,
}

#[derive(Debug)]
struct AdapterTable<N: Styleable> {
    records: Vec<AdapterRecord<N>>,
    slots: HashMap<N::Key, usize>,
    stats: AdapterStats,
}

/// Reference-count bookkeeping for one adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdapterStats {
    /// Distinct host nodes seen.
    pub records: usize,
    /// Handles given out, each one a retain on the host node.
    pub adaptations: usize,
    /// Handles given back.
    pub releases: usize,
}

impl AdapterStats {
    /// Handles given out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.adaptations.saturating_sub(self.releases)
    }
}

/// The traversal-primitive table for host nodes of type `N`.
///
/// Not `Sync`: an adapter and its handles belong to the thread running the
/// query.
#[derive(Debug)]
pub struct NodeAdapter<N: Styleable> {
    token: InterfaceToken,
    table: RefCell<AdapterTable<N>>,
}

impl<N: Styleable> Default for NodeAdapter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Styleable> NodeAdapter<N> {
    pub fn new() -> Self {
        Self {
            token: InterfaceToken::next(),
            table: RefCell::new(AdapterTable {
                records: Vec::new(),
                slots: HashMap::new(),
                stats: AdapterStats::default(),
            }),
        }
    }

    pub fn token(&self) -> InterfaceToken {
        self.token
    }

    pub fn stats(&self) -> AdapterStats {
        self.table.borrow().stats
    }

    /// Adapts `host`, reusing its record if one exists, and retains it.
    pub fn adapt(&self, host: &N) -> NodeHandle {
        let mut table = self.table.borrow_mut();
        let key = host.node_key();

        let slot = match table.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = table.records.len();
                table.records.push(AdapterRecord {
                    host: host.clone(),
                    handed_out: 0,
                    released: 0,
                });
                table.slots.insert(key, slot);
                table.stats.records += 1;
                slot
            }
        };

        table.records[slot].handed_out += 1;
        table.stats.adaptations += 1;
        host.retain();

        NodeHandle {
            token: self.token,
            slot,
        }
    }

    /// Adapts an optional host node; no node adapts to no handle.
    pub fn adapt_opt(&self, host: Option<N>) -> Option<NodeHandle> {
        host.map(|host| self.adapt(&host))
    }

    /// The host node behind `handle`.
    pub fn host(&self, handle: NodeHandle) -> Result<N> {
        if handle.token != self.token {
            return Err(StyleError::ContractViolation(format!(
                "handle {handle:?} was issued by another adapter ({:?})",
                self.token
            )));
        }
        self.table
            .borrow()
            .records
            .get(handle.slot)
            .map(|record| record.host.clone())
            .ok_or_else(|| {
                StyleError::ContractViolation(format!("handle {handle:?} has no record"))
            })
    }

    /// Like [`host`](Self::host), but reports the violation and yields no
    /// node. Traversal primitives cannot return errors to the engine.
    fn checked_host(&self, handle: NodeHandle) -> Option<N> {
        match self.host(handle) {
            Ok(host) => Some(host),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }
}

impl<N: Styleable> NodeIface for NodeAdapter<N> {
    type Node = NodeHandle;

    fn parent_node(&self, node: NodeHandle) -> Option<NodeHandle> {
        let host = self.checked_host(node)?;
        self.adapt_opt(host.parent_node())
    }

    fn first_child(&self, node: NodeHandle) -> Option<NodeHandle> {
        let host = self.checked_host(node)?;
        self.adapt_opt(host.first_child())
    }

    fn next_sibling(&self, node: NodeHandle) -> Option<NodeHandle> {
        let host = self.checked_host(node)?;
        self.adapt_opt(host.next_sibling())
    }

    fn previous_sibling(&self, node: NodeHandle) -> Option<NodeHandle> {
        let host = self.checked_host(node)?;
        self.adapt_opt(host.previous_sibling())
    }

    fn node_name(&self, node: NodeHandle) -> String {
        self.checked_host(node)
            .map(|host| host.node_name().into_owned())
            .unwrap_or_default()
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Option<String> {
        self.checked_host(node)?.attribute(name)
    }

    fn children_count(&self, node: NodeHandle) -> usize {
        self.checked_host(node)
            .map_or(0, |host| host.children_count())
    }

    fn index(&self, node: NodeHandle) -> usize {
        self.checked_host(node).map_or(0, |host| host.index())
    }

    /// Gives back one retain. The record itself stays until the adapter is
    /// dropped.
    fn release(&self, node: NodeHandle) {
        let Some(host) = self.checked_host(node) else {
            return;
        };

        let mut table = self.table.borrow_mut();
        let record = &mut table.records[node.slot];
        if record.released >= record.handed_out {
            log::error!("release of {node:?} without a matching adaptation");
            return;
        }
        record.released += 1;
        table.stats.releases += 1;
        drop(table);

        host.release();
    }
}
