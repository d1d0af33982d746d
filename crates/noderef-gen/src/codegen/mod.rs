//! Code generation for the reference artifacts
//!
//! This module provides generators for:
//! - Stub functions for modules, globals and classes (`stub`)
//! - The lazy `require` shim wrapping the module stubs (`require`)
//! - The module doc table (`doc_table`)
//! - Both artifacts at once (`reference`)

pub mod doc_table;
pub mod path_bodies;
pub mod reference;
pub mod require;
pub mod stub;
pub mod writer;

pub use doc_table::{DocEntry, DocTableEmitter, DocTableFormat, DocTableOptions};
pub use reference::{GeneratorOptions, ReferenceArtifacts, ReferenceGenerator};
pub use require::RequireShimEmitter;
pub use stub::{Container, StubEmitter};
pub use writer::CodeWriter;
