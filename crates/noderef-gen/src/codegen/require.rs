//! Require shim generator
//!
//! Produces the self-invoking loader assigned to `require`. Every module is
//! listed in a cache as `null` and only built, through `make_module`, the
//! first time it is required. Every 50th call yields to the host through
//! `intellisense.progress()`. Lookups that miss the cache run inside a
//! depth-tracked block whose ambient state (`__filename`, `__dirname`,
//! `max_require_depth`) is restored by `finally` on every exit path.

use crate::codegen::{CodeWriter, StubEmitter};
use crate::error::GenResult;
use crate::ir::ModuleDoc;
use crate::names::normalize_module_name;
use crate::text::escape_literal;

/// Program-wide name the loader is bound to
pub const LOADER_NAME: &str = "require";

/// Calls between two `intellisense.progress()` yields
pub const PROGRESS_THRESHOLD: u32 = 50;

/// Nesting cap for user-module resolution
pub const MAX_REQUIRE_DEPTH: u32 = 5;

/// Placeholder hosts replace with their own user-module resolution
pub const USER_MODULE_SWITCH_MARKER: &str = "// **NTVS** INSERT USER MODULE SWITCH HERE **NTVS**";

/// Generator for the `require` shim
pub struct RequireShimEmitter<'a> {
    modules: &'a [ModuleDoc],
}

impl<'a> RequireShimEmitter<'a> {
    pub fn new(modules: &'a [ModuleDoc]) -> Self {
        Self { modules }
    }

    /// Emit the complete shim
    pub fn emit(&self, w: &mut CodeWriter, stubs: &mut StubEmitter<'_>) -> GenResult<()> {
        w.line(format!("{} = function () {{", LOADER_NAME));
        {
            let mut body = w.indent();
            body.line("var require_count = 0;");
            body.line("var require_depth = 0;");
            body.line(format!("var max_require_depth = {};", MAX_REQUIRE_DEPTH));

            self.emit_cache(&mut body);
            self.emit_dispatcher(&mut body, stubs)?;
            body.block(&resolver_source());
            body.line("return f;");
        }
        w.line("}();");
        Ok(())
    }

    /// `var cache = { "<name>": null, ... }`
    fn emit_cache(&self, w: &mut CodeWriter) {
        w.line("var cache = {");
        {
            let mut entries = w.indent();
            for module in self.modules {
                entries.line(format!(
                    "\"{}\": null,",
                    escape_literal(normalize_module_name(&module.name))
                ));
            }
        }
        w.line("}");
    }

    /// `make_module` switches over every module name and builds exactly one
    fn emit_dispatcher(&self, w: &mut CodeWriter, stubs: &mut StubEmitter<'_>) -> GenResult<()> {
        w.line("function make_module(module_name) {");
        {
            let mut body = w.indent();
            body.line("switch(module_name) {");
            {
                let mut cases = body.indent();
                for module in self.modules {
                    let lead = format!(
                        "case \"{}\": return new ",
                        escape_literal(normalize_module_name(&module.name))
                    );
                    stubs.emit_module(&mut cases, module, &lead, ";")?;
                }
            }
            body.line("}");
        }
        w.line("}");
        Ok(())
    }
}

/// The resolver function `f` returned by the shim
fn resolver_source() -> String {
    format!(
        r#"var f = function(module) {{
    module = module.replace(/\\/g, '/');
    if(require_count++ >= {threshold}) {{
        require_count = 0;
        intellisense.progress();
    }}
    var result = cache[module];
    if(typeof result !== 'undefined') {{
        if(result === null) {{
            // modules are only built once something requires them
            cache[module] = result = make_module(module);
        }}
        return result;
    }}
    // not a core module, see if the host can resolve it
    var __prevFilename = __filename;
    var __prevDirname = __dirname;
    var __prevMaxRequireDepth = max_require_depth;
    try {{
        if(require_depth < max_require_depth) {{
            require_depth++;
            try {{
                {marker}
            }} finally {{
                require_depth--;
            }}
        }}
    }} finally {{
        __filename = __prevFilename;
        __dirname = __prevDirname;
        max_require_depth = __prevMaxRequireDepth;
    }}
}}"#,
        threshold = PROGRESS_THRESHOLD,
        marker = USER_MODULE_SWITCH_MARKER,
    )
}
