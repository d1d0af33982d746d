//! Typed documentation tree
//!
//! Mirrors the shape of the Node.js `all.json` API dump: modules with
//! methods, events, properties and classes, plus loosely-typed misc
//! sections, one of which lists the global objects.

pub mod doc;
pub mod tree;

pub use doc::*;
pub use tree::*;
