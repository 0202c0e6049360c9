//! # gstyle - CSS properties for host-owned trees
//!
//! Lets any tree whose nodes implement [`Styleable`] be styled by a CSS
//! stylesheet. Parse a [`Stylesheet`] once, then ask it for the value the
//! cascade assigns to a property of a node.
//!
//! ```rust
//! use std::borrow::Cow;
//! use gstyle::{Styleable, Stylesheet};
//!
//! #[derive(Clone)]
//! struct Label;
//!
//! impl Styleable for Label {
//!     type Key = ();
//!
//!     fn node_key(&self) -> Self::Key {}
//!     fn parent_node(&self) -> Option<Self> { None }
//!     fn first_child(&self) -> Option<Self> { None }
//!     fn next_sibling(&self) -> Option<Self> { None }
//!     fn previous_sibling(&self) -> Option<Self> { None }
//!     fn node_name(&self) -> Cow<'_, str> { Cow::Borrowed("Label") }
//!     fn attribute(&self, _name: &str) -> Option<String> { None }
//!     fn children_count(&self) -> usize { 0 }
//!     fn index(&self) -> usize { 0 }
//! }
//!
//! let sheet = Stylesheet::from_source("Label { color: red; } Label { color: blue; }")?;
//! assert_eq!(sheet.get_property(&Label, "color")?.as_deref(), Some("blue"));
//! assert_eq!(sheet.get_property(&Label, "margin")?, None);
//! # Ok::<(), gstyle::StyleError>(())
//! ```
//!
//! ## Modules
//!
//! - [`styleable`]: The capability host nodes implement
//! - [`adapter`]: Identity-cached bridge from host nodes to the engine
//! - [`stylesheet`]: The parsed stylesheet handle
//! - [`resolver`]: Cascade resolution of a single property
//! - [`log_init`]: Optional file logger

pub mod adapter;
pub mod error;
pub mod log_init;
pub mod resolver;
pub mod styleable;
pub mod stylesheet;

pub use adapter::{AdapterStats, InterfaceToken, NodeAdapter, NodeHandle};
pub use error::{Result, StyleError};
pub use resolver::get_property;
pub use styleable::Styleable;
pub use stylesheet::Stylesheet;

pub use gcss;
