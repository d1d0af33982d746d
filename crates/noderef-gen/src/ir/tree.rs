//! Root of the documentation tree

use serde::{Deserialize, Serialize};

use crate::error::GenResult;
use crate::ir::ModuleDoc;

/// Name of the misc section that lists the global objects
pub const GLOBAL_OBJECTS_SECTION: &str = "Global Objects";

/// The parsed documentation tree (`all.json`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocTree {
    #[serde(default)]
    pub modules: Vec<ModuleDoc>,

    #[serde(default)]
    pub miscs: Vec<MiscDoc>,
}

impl DocTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tree from its JSON form
    pub fn from_json(source: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Add a module
    pub fn module(mut self, module: ModuleDoc) -> Self {
        self.modules.push(module);
        self
    }

    /// Add a misc section
    pub fn misc(mut self, misc: MiscDoc) -> Self {
        self.miscs.push(misc);
        self
    }

    /// Globals that get a top-level declaration.
    ///
    /// Only the first "Global Objects" section is consulted, and only
    /// globals carrying at least one member facet are yielded.
    pub fn declared_globals(&self) -> impl Iterator<Item = &ModuleDoc> {
        self.miscs
            .iter()
            .find(|misc| misc.name == GLOBAL_OBJECTS_SECTION)
            .and_then(|misc| misc.globals.as_deref())
            .unwrap_or_default()
            .iter()
            .filter(|global| global.has_members())
    }
}

/// A loosely-typed misc section; only `name` and `globals` are read
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MiscDoc {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globals: Option<Vec<ModuleDoc>>,
}

impl MiscDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            globals: None,
        }
    }

    pub fn global(mut self, global: ModuleDoc) -> Self {
        self.globals.get_or_insert_with(Vec::new).push(global);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::PropertyDoc;

    #[test]
    fn test_declared_globals_filter() {
        let tree = DocTree::new()
            .misc(MiscDoc::new("Synopsis"))
            .misc(
                MiscDoc::new(GLOBAL_OBJECTS_SECTION)
                    .global(ModuleDoc::new("__dirname").with_desc("<p>dir</p>"))
                    .global(ModuleDoc::new("process").property(PropertyDoc::new("pid"))),
            );

        let names: Vec<_> = tree.declared_globals().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["process"]);
    }

    #[test]
    fn test_no_global_section() {
        let tree = DocTree::new().module(ModuleDoc::new("fs"));
        assert_eq!(tree.declared_globals().count(), 0);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let json = r#"{
            "source": "doc/api/all.markdown",
            "modules": [ { "name": "fs", "textRaw": "File System", "type": "module" } ],
            "miscs": [ { "textRaw": "About", "type": "misc" } ]
        }"#;
        let tree = DocTree::from_json(json).unwrap();
        assert_eq!(tree.modules[0].name, "fs");
        assert_eq!(tree.miscs[0].name, "");
    }

    #[test]
    fn test_from_json_rejects_malformed_tree() {
        assert!(DocTree::from_json(r#"{ "modules": [ { "desc": "nameless" } ] }"#).is_err());
    }
}
