//! noderef-gen: IntelliSense reference generator for the Node.js API docs
//!
//! Turns the parsed Node.js API documentation (`all.json`) into two text
//! artifacts:
//!
//! - a JavaScript stub source defining every module, class, method,
//!   property and event as inert stand-ins annotated with `///` doc
//!   comments, wrapped in a lazy `require` shim, for static analysis;
//! - a doc table mapping module names to flattened descriptions, for the
//!   completion list.
//!
//! # Architecture
//!
//! - `ir`: Typed documentation tree
//! - `text`: HTML-subset reader and description conversions
//! - `names`: Identifier-safe names
//! - `infer`: Default values for property stubs
//! - `codegen`: Artifact generators
//!
//! # Usage
//!
//! ```rust
//! use noderef_gen::{DocTree, ReferenceGenerator};
//!
//! let tree = DocTree::from_json(r#"{
//!     "modules": [
//!         { "name": "util", "methods": [ { "name": "createThing", "signatures": [ { "params": [] } ] } ] }
//!     ]
//! }"#).unwrap();
//!
//! let artifacts = ReferenceGenerator::new(&tree).generate().unwrap();
//! assert!(artifacts.stubs.contains("return new this.Thing();"));
//! assert!(artifacts.doc_table.contains("{\"util\", \"\" },"));
//! ```

pub mod codegen;
pub mod error;
pub mod infer;
pub mod ir;
pub mod names;
pub mod text;

// Re-export commonly used types
pub use codegen::{
    DocTableFormat, DocTableOptions, GeneratorOptions, ReferenceArtifacts, ReferenceGenerator,
};
pub use error::{Diagnostic, GenError, GenResult};
pub use infer::{PropertySpecializer, RuntimeProfile, SpecializerRegistry};
pub use ir::{DocTree, ModuleDoc};
