//! Top-level generator producing both artifacts from one tree

use crate::codegen::{CodeWriter, DocTableEmitter, DocTableOptions, RequireShimEmitter, StubEmitter};
use crate::error::{Diagnostic, Diagnostics, GenResult};
use crate::infer::{RuntimeProfile, SpecializerRegistry};
use crate::ir::DocTree;

/// Line that opens the stub artifact, before any declaration
pub const GLOBAL_PROLOGUE: &str = "global = {};";

/// Generation settings
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Source text placed verbatim at the top of the stub artifact
    pub header: Option<String>,
    pub doc_table: DocTableOptions,
    pub runtime: RuntimeProfile,
}

/// The two generated artifacts plus what went wrong along the way
#[derive(Debug, Clone)]
pub struct ReferenceArtifacts {
    /// JavaScript stub source
    pub stubs: String,
    /// Module doc table
    pub doc_table: String,
    /// Recoverable problems, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

/// Generates the stub source and the doc table for a documentation tree
pub struct ReferenceGenerator<'a> {
    tree: &'a DocTree,
    options: GeneratorOptions,
    registry: SpecializerRegistry,
}

impl<'a> ReferenceGenerator<'a> {
    /// Create a generator with default options
    pub fn new(tree: &'a DocTree) -> Self {
        Self::with_options(tree, GeneratorOptions::default())
    }

    /// Create a generator; the `process` specializer follows `options.runtime`
    pub fn with_options(tree: &'a DocTree, options: GeneratorOptions) -> Self {
        let registry = SpecializerRegistry::with_defaults(options.runtime.clone());
        Self {
            tree,
            options,
            registry,
        }
    }

    /// Replace the specializer registry
    pub fn with_registry(mut self, registry: SpecializerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Generate both artifacts. Fails as a whole; no partial output.
    pub fn generate(&self) -> GenResult<ReferenceArtifacts> {
        let mut diagnostics = Diagnostics::new();
        let stubs = self.generate_stubs(&mut diagnostics)?;
        let doc_table = self.generate_doc_table(&mut diagnostics)?;

        tracing::info!(
            modules = self.tree.modules.len(),
            warnings = diagnostics.len(),
            "generated reference artifacts"
        );
        Ok(ReferenceArtifacts {
            stubs,
            doc_table,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Header, prologue, global declarations, then the require shim
    pub fn generate_stubs(&self, diagnostics: &mut Diagnostics) -> GenResult<String> {
        let mut w = CodeWriter::new();
        if let Some(header) = &self.options.header {
            w.raw(header);
            if !header.is_empty() && !header.ends_with('\n') {
                w.raw("\n");
            }
        }
        w.line(GLOBAL_PROLOGUE);

        let mut stubs = StubEmitter::new(&self.registry, diagnostics);
        for global in self.tree.declared_globals() {
            stubs.emit_global(&mut w, global)?;
        }
        RequireShimEmitter::new(&self.tree.modules).emit(&mut w, &mut stubs)?;

        Ok(w.finish())
    }

    /// The doc table in the configured format
    pub fn generate_doc_table(&self, diagnostics: &mut Diagnostics) -> GenResult<String> {
        DocTableEmitter::new(&self.tree.modules, &self.options.doc_table).emit(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use crate::ir::{
        ClassDoc, EventDoc, MethodDoc, MiscDoc, ModuleDoc, ParamDoc, PropertyDoc, SignatureDoc,
        GLOBAL_OBJECTS_SECTION,
    };
    use pretty_assertions::assert_eq;

    fn sample_tree() -> DocTree {
        DocTree::new()
            .module(
                ModuleDoc::new("util")
                    .with_desc("<p>Utilities.</p>")
                    .method(MethodDoc::new("createThing").signature(SignatureDoc::new())),
            )
            .module(
                ModuleDoc::new("net")
                    .method(
                        MethodDoc::new("createServer").signature(
                            SignatureDoc::new().param(ParamDoc::new("options").with_type("Object")),
                        ),
                    )
                    .class(
                        ClassDoc::new("net.Server")
                            .event(EventDoc::new("connection"))
                            .property(PropertyDoc::new("maxConnections")),
                    ),
            )
            .misc(
                MiscDoc::new(GLOBAL_OBJECTS_SECTION)
                    .global(ModuleDoc::new("__filename").with_desc("<p>name</p>"))
                    .global(
                        ModuleDoc::new("process")
                            .event(EventDoc::new("exit"))
                            .property(PropertyDoc::new("platform"))
                            .property(PropertyDoc::new("stderr").with_text_raw("process.stderr")),
                    ),
            )
    }

    #[test]
    fn test_stub_artifact_layout() {
        let tree = sample_tree();
        let artifacts = ReferenceGenerator::new(&tree).generate().unwrap();
        let stubs = &artifacts.stubs;

        assert!(stubs.starts_with("global = {};\nvar process = new function __process() {\n"));
        assert!(stubs.contains("    this.platform = 'win32';\n"));
        assert!(stubs.contains("    this.stderr = require('stream').Writable();\n"));
        assert!(!stubs.contains("__filename = new"));

        let global = stubs.find("var process").unwrap();
        let shim = stubs.find("require = function () {").unwrap();
        assert!(global < shim);

        assert!(stubs.contains("            case \"util\": return new function util() {\n"));
        assert!(stubs.contains("                this.createThing = function() {\n                    return new this.Thing();\n"));
        assert!(stubs.contains("return new this.Server();"));
    }

    #[test]
    fn test_diagnostics_reported() {
        let tree = sample_tree();
        let artifacts = ReferenceGenerator::new(&tree).generate().unwrap();

        assert_eq!(
            artifacts.diagnostics,
            vec![Diagnostic::MissingFactoryTarget {
                container: "util".into(),
                method: "createThing".into(),
                class: "Thing".into(),
            }]
        );
    }

    #[test]
    fn test_doc_table_artifact() {
        let tree = sample_tree();
        let artifacts = ReferenceGenerator::new(&tree).generate().unwrap();

        assert!(artifacts.doc_table.contains("            {\"util\", \"Utilities.\" },\n"));
        assert!(artifacts.doc_table.contains("            {\"net\", \"\" },\n"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let tree = sample_tree();
        let generator = ReferenceGenerator::new(&tree);
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();

        assert_eq!(first.stubs, second.stubs);
        assert_eq!(first.doc_table, second.doc_table);
    }

    #[test]
    fn test_header_and_runtime_options() {
        let tree = sample_tree();
        let options = GeneratorOptions {
            header: Some("// intellisense header".to_string()),
            runtime: RuntimeProfile {
                platform: "linux".to_string(),
                ..RuntimeProfile::default()
            },
            ..GeneratorOptions::default()
        };
        let artifacts = ReferenceGenerator::with_options(&tree, options)
            .generate()
            .unwrap();

        assert!(artifacts.stubs.starts_with("// intellisense header\nglobal = {};\n"));
        assert!(artifacts.stubs.contains("this.platform = 'linux';"));
    }

    #[test]
    fn test_custom_registry() {
        let tree = sample_tree();
        let artifacts = ReferenceGenerator::new(&tree)
            .with_registry(SpecializerRegistry::new())
            .generate()
            .unwrap();
        assert!(artifacts.stubs.contains("    this.platform = undefined;\n"));
    }

    #[test]
    fn test_event_list_excludes_spaced_names() {
        let tree = DocTree::new().module(
            ModuleDoc::new("stream")
                .event(EventDoc::new("data"))
                .event(EventDoc::new("end of stream")),
        );
        let artifacts = ReferenceGenerator::new(&tree).generate().unwrap();

        assert!(artifacts.stubs.contains("/// data&#10;\n"));
        assert!(artifacts.stubs.contains("Supported Events: data</summary>"));
        assert!(!artifacts.stubs.contains("end of stream"));
    }

    #[test]
    fn test_malformed_tree_fails_whole_run() {
        let tree = DocTree::new()
            .module(ModuleDoc::new("fs"))
            .module(ModuleDoc::new("os").method(MethodDoc::new("cpus")));
        let err = ReferenceGenerator::new(&tree).generate().unwrap_err();
        assert!(matches!(err, GenError::MissingSignatures { ref method, .. } if method == "cpus"));
    }

    #[test]
    fn test_empty_tree() {
        let tree = DocTree::new();
        let artifacts = ReferenceGenerator::new(&tree).generate().unwrap();
        assert!(artifacts.stubs.starts_with("global = {};\nrequire = function () {\n"));
        assert!(artifacts.diagnostics.is_empty());
        assert_eq!(
            artifacts.stubs.lines().filter(|l| l.contains("case \"")).count(),
            0
        );
    }
}
