//! # gcss - CSS engine for foreign trees
//!
//! Parses CSS into a rule/selector/declaration object model and matches
//! selectors against any tree that implements the [`NodeIface`] traversal
//! table. The engine owns no nodes and knows no node types.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcss::parser::parse_stylesheet;
//!
//! let source = r#"
//!     Button {
//!         color: red;
//!         margin: 1px 2px;
//!     }
//!
//!     Button.primary {
//!         background: blue;
//!     }
//! "#;
//!
//! let stylesheet = parse_stylesheet(source).expect("valid CSS");
//! assert_eq!(stylesheet.rulesets().count(), 2);
//! ```
//!
//! ## Supported Features
//!
//! ### Selectors
//! - Type selectors: `Button`, `Label`
//! - Class selectors: `.primary` (matched against the `class` attribute)
//! - ID selectors: `#submit` (matched against the `id` attribute)
//! - Universal selector: `*`
//! - Attribute selectors: `[type]`, `[type=text]`, `~=`, `|=`, `^=`, `$=`, `*=`
//! - Structural pseudo-classes: `:root`, `:first-child`, `:last-child`,
//!   `:only-child`, `:empty`, `:nth-child()`, `:nth-last-child()`
//! - Combinators: descendant, child `>`, adjacent `+`, general sibling `~`
//!
//! ### Statements
//! - Rulesets with `!important` preserved on declarations
//! - At-rules, kept verbatim and never matched
//!
//! ## Modules
//!
//! - [`parser`]: CSS parsing and stylesheet data structures
//! - [`engine`]: Selector matching through [`NodeIface`]
//! - [`error`]: Error types for parsing failures

pub mod engine;
pub mod error;
pub mod parser;

pub use engine::{MatchStats, NodeFlags, NodeIface, SelectionEngine};
pub use error::CssError;
pub use parser::{Charset, ParserOptions, StyleSheet};
