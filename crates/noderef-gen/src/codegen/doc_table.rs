//! Module doc table generator
//!
//! Pairs every module's require name with a flattened description, for the
//! completion list shown when typing `require('`. Entries keep input order;
//! duplicates are kept as they are.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codegen::CodeWriter;
use crate::error::{Diagnostic, Diagnostics, GenError, GenResult};
use crate::ir::ModuleDoc;
use crate::names::normalize_module_name;
use crate::text::{escape_literal, render_inline, InlineStyle};

/// Output format of the doc table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocTableFormat {
    /// A C# dictionary initializer inside a partial class
    #[default]
    CSharp,
    /// A JSON array of `{ "name", "doc" }` objects
    Json,
}

impl FromStr for DocTableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csharp" => Ok(DocTableFormat::CSharp),
            "json" => Ok(DocTableFormat::Json),
            other => Err(format!(
                "unknown doc table format `{}` (expected `csharp` or `json`)",
                other
            )),
        }
    }
}

/// Doc table layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocTableOptions {
    pub format: DocTableFormat,
    /// Namespace of the generated C# class
    pub namespace: String,
    /// Name of the partial class holding the table
    pub class_name: String,
    /// Name of the dictionary field
    pub field_name: String,
    /// Comment block (usually a license notice) placed verbatim above the
    /// C# `using` lines
    pub banner: Option<String>,
}

impl Default for DocTableOptions {
    fn default() -> Self {
        Self {
            format: DocTableFormat::CSharp,
            namespace: "Microsoft.NodejsTools.Intellisense".to_string(),
            class_name: "CompletionSource".to_string(),
            field_name: "_nodejsModules".to_string(),
            banner: None,
        }
    }
}

/// One row of the doc table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    pub name: String,
    pub doc: String,
}

/// Generator for the doc table
pub struct DocTableEmitter<'a> {
    modules: &'a [ModuleDoc],
    options: &'a DocTableOptions,
}

impl<'a> DocTableEmitter<'a> {
    pub fn new(modules: &'a [ModuleDoc], options: &'a DocTableOptions) -> Self {
        Self { modules, options }
    }

    /// Flatten every module description in the given style.
    ///
    /// A description that fails to parse becomes an empty doc string.
    pub fn entries(&self, style: InlineStyle, diagnostics: &mut Diagnostics) -> Vec<DocEntry> {
        self.modules
            .iter()
            .map(|module| {
                let name = normalize_module_name(&module.name).to_string();
                let desc = module.desc.as_deref().unwrap_or_default();
                let doc = render_inline(desc, style).unwrap_or_else(|error| {
                    diagnostics.push(Diagnostic::UnparseableDescription {
                        context: module.name.clone(),
                        error,
                    });
                    String::new()
                });
                DocEntry { name, doc }
            })
            .collect()
    }

    /// Render the table in the configured format
    pub fn emit(&self, diagnostics: &mut Diagnostics) -> GenResult<String> {
        match self.options.format {
            DocTableFormat::CSharp => Ok(self.emit_csharp(diagnostics)),
            DocTableFormat::Json => self.emit_json(diagnostics),
        }
    }

    fn emit_csharp(&self, diagnostics: &mut Diagnostics) -> String {
        let entries = self.entries(InlineStyle::ESCAPED, diagnostics);

        let mut w = CodeWriter::new();
        if let Some(banner) = &self.options.banner {
            w.raw(banner);
            if !banner.is_empty() && !banner.ends_with('\n') {
                w.raw("\n");
            }
        }
        w.line("using System.Collections.Generic;");
        w.line("using Microsoft.VisualStudio.Language.Intellisense;");
        w.line("");
        w.line(format!("namespace {} {{", self.options.namespace));
        {
            let mut ns = w.indent();
            ns.line(format!(
                "sealed partial class {} : ICompletionSource {{",
                self.options.class_name
            ));
            {
                let mut class = ns.indent();
                class.line(format!(
                    "private static Dictionary<string, string> {} = new Dictionary<string, string>() {{",
                    self.options.field_name
                ));
                {
                    let mut rows = class.indent();
                    for entry in &entries {
                        rows.line(format!(
                            "{{\"{}\", \"{}\" }},",
                            escape_literal(&entry.name),
                            entry.doc
                        ));
                    }
                }
                class.line("};");
            }
            ns.line("}");
        }
        w.line("}");
        w.finish()
    }

    fn emit_json(&self, diagnostics: &mut Diagnostics) -> GenResult<String> {
        let entries = self.entries(InlineStyle::PLAIN, diagnostics);
        let mut json = serde_json::to_string_pretty(&entries)
            .map_err(|e| GenError::DocTable(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}
