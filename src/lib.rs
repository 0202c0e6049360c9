//! CSS styling for trees you already own.
//!
//! This crate bundles [`gstyle`], the adapter and property resolver, with
//! [`gcss`], the parser and selector engine underneath it. Most users only
//! need the re-exports below.

pub use gcss;
pub use gstyle;

pub use gstyle::log_init::init_logger;
pub use gstyle::{Result, StyleError, Styleable, Stylesheet, get_property};
