//! Stub generator for modules, globals and classes
//!
//! Every documented container becomes a constructor-style function whose
//! body assigns stub members to `this`:
//!
//! ```text
//! function fs() {
//!     /// <summary>...</summary>
//!     this.open = function(path, flags) {
//!         /// <signature>
//!         /// <param name="path" type="String"></param>
//!         /// </signature>
//!     }
//!     function _Stats() {
//!         ...
//!     }
//!     this.Stats = function() {
//!         return new _Stats();
//!     }
//!     this.constants = undefined;
//! }
//! ```
//!
//! Members are written in a fixed order: methods, events, classes, then
//! properties. Consumers locate members by position, so the order matters.

use crate::codegen::path_bodies::{path_method_body, PATH_MODULE};
use crate::codegen::CodeWriter;
use crate::error::{Diagnostic, Diagnostics, GenError, GenResult};
use crate::infer::{infer_default, PropertySpecializer, SpecializerRegistry};
use crate::ir::{ClassDoc, EventDoc, MethodDoc, ModuleDoc, PropertyDoc, SignatureDoc};
use crate::names::{normalize_class_name, normalize_module_name};
use crate::text::{to_doc_comment, to_plain_summary};

/// A documented scope that becomes one constructor-style function
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    /// A module built lazily by the require shim
    Module(&'a ModuleDoc),
    /// A global object declared with `var`
    Global(&'a ModuleDoc),
    /// A class nested in a module or global
    Class(&'a ClassDoc),
}

impl<'a> Container<'a> {
    /// Name of the generated function
    pub fn function_name(&self) -> GenResult<String> {
        let name = match self {
            Container::Module(m) => normalize_module_name(&m.name).to_string(),
            Container::Global(g) => format!("__{}", identifier("", &g.name)?),
            Container::Class(c) => format!("_{}", class_identifier(c)?),
        };
        if name.is_empty() {
            return Err(GenError::empty_identifier("<root>", self.raw_name()));
        }
        Ok(name)
    }

    fn raw_name(&self) -> &'a str {
        match *self {
            Container::Module(m) | Container::Global(m) => &m.name,
            Container::Class(c) => &c.name,
        }
    }

    fn desc(&self) -> Option<&'a str> {
        match *self {
            Container::Module(m) | Container::Global(m) => m.desc.as_deref(),
            Container::Class(c) => c.desc.as_deref(),
        }
    }

    fn methods(&self) -> &'a [MethodDoc] {
        let methods = match *self {
            Container::Module(m) | Container::Global(m) => m.methods.as_deref(),
            Container::Class(c) => c.methods.as_deref(),
        };
        methods.unwrap_or_default()
    }

    fn events(&self) -> Option<&'a [EventDoc]> {
        match *self {
            Container::Module(m) | Container::Global(m) => m.events.as_deref(),
            Container::Class(c) => c.events.as_deref(),
        }
    }

    fn classes(&self) -> &'a [ClassDoc] {
        match *self {
            Container::Module(m) | Container::Global(m) => m.classes.as_deref().unwrap_or_default(),
            Container::Class(_) => &[],
        }
    }

    fn properties(&self) -> &'a [PropertyDoc] {
        let properties = match *self {
            Container::Module(m) | Container::Global(m) => m.properties.as_deref(),
            Container::Class(c) => c.properties.as_deref(),
        };
        properties.unwrap_or_default()
    }

    /// Hand-written body replacing the stub of `method`, if any
    fn body_override(&self, method: &str) -> Option<String> {
        match *self {
            Container::Module(m) if normalize_module_name(&m.name) == PATH_MODULE => {
                path_method_body(method)
            }
            _ => None,
        }
    }
}

/// Emits stub functions into a [`CodeWriter`]
pub struct StubEmitter<'a> {
    registry: &'a SpecializerRegistry,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> StubEmitter<'a> {
    pub fn new(registry: &'a SpecializerRegistry, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    /// Emit `{lead}function <name>() { ... }{trail}` for a module
    pub fn emit_module(
        &mut self,
        w: &mut CodeWriter,
        module: &ModuleDoc,
        lead: &str,
        trail: &str,
    ) -> GenResult<()> {
        tracing::debug!(module = %module.name, "emitting module stub");
        self.emit_container(w, Container::Module(module), lead, trail)
    }

    /// Emit `var <name> = new function __<name>() { ... };` for a global
    pub fn emit_global(&mut self, w: &mut CodeWriter, global: &ModuleDoc) -> GenResult<()> {
        tracing::debug!(global = %global.name, "emitting global stub");
        let lead = format!("var {} = new ", identifier("", &global.name)?);
        self.emit_container(w, Container::Global(global), &lead, ";")
    }

    fn emit_container(
        &mut self,
        w: &mut CodeWriter,
        container: Container<'_>,
        lead: &str,
        trail: &str,
    ) -> GenResult<()> {
        let name = container.function_name()?;
        w.line(format!("{}function {}() {{", lead, name));
        {
            let mut body = w.indent();

            if let Some(desc) = container.desc() {
                body.line(format!("/// <summary>{}</summary>", to_doc_comment(desc)));
            }

            for method in container.methods() {
                self.emit_method(&mut body, &container, &name, method)?;
            }

            if let Some(events) = container.events() {
                emit_events(&mut body, events);
            }

            for class in container.classes() {
                self.emit_class(&mut body, class)?;
            }

            let specializer = match container {
                Container::Class(_) => None,
                _ => self.registry.get(&name),
            };
            for property in container.properties() {
                emit_property(&mut body, &name, property, specializer)?;
            }
        }
        w.line(format!("}}{}", trail));
        Ok(())
    }

    /// Classes are never exposed as constructors; the container gets a
    /// same-named factory returning a fresh instance instead
    fn emit_class(&mut self, w: &mut CodeWriter, class: &ClassDoc) -> GenResult<()> {
        let class_name = class_identifier(class)?;
        self.emit_container(w, Container::Class(class), "", "")?;
        w.line("");
        w.line(format!("this.{} = function() {{", class_name));
        w.indent().line(format!("return new _{}();", class_name));
        w.line("}");
        Ok(())
    }

    fn emit_method(
        &mut self,
        w: &mut CodeWriter,
        container: &Container<'_>,
        container_name: &str,
        method: &MethodDoc,
    ) -> GenResult<()> {
        let name = identifier(container_name, &method.name)?;
        let first = method
            .signatures
            .first()
            .ok_or_else(|| GenError::MissingSignatures {
                container: container_name.to_string(),
                method: method.name.clone(),
            })?;

        let params = first
            .positional_params()
            .map(|p| identifier(container_name, &p.name))
            .collect::<GenResult<Vec<_>>>()?;

        w.line(format!("this.{} = function({}) {{", name, params.join(", ")));
        {
            let mut body = w.indent();

            if let Some(desc) = &method.desc {
                body.line(format!("/// <summary>{}</summary>", to_doc_comment(desc)));
            }

            for signature in &method.signatures {
                emit_signature_doc(&mut body, signature);
            }

            if let Some(code) = container.body_override(&method.name) {
                body.block(&code);
            } else if let Some(target) = method.factory_target() {
                self.check_factory_target(container, container_name, &method.name, target);
                body.line(format!("return new this.{}();", target));
            }
        }
        w.line("}");
        Ok(())
    }

    fn check_factory_target(
        &mut self,
        container: &Container<'_>,
        container_name: &str,
        method: &str,
        target: &str,
    ) {
        let declared = container
            .classes()
            .iter()
            .any(|class| normalize_class_name(&class.name) == target);

        if !declared {
            self.diagnostics.push(Diagnostic::MissingFactoryTarget {
                container: container_name.to_string(),
                method: method.to_string(),
                class: target.to_string(),
            });
        }
    }
}

/// Normalize a member name, rejecting names with no identifier-safe prefix
fn identifier(container: &str, raw: &str) -> GenResult<String> {
    let name = normalize_module_name(raw);
    if name.is_empty() {
        return Err(GenError::empty_identifier(container, raw));
    }
    Ok(name.to_string())
}

/// Normalized class name; nested qualifiers like `a.b.C` are rejected
fn class_identifier(class: &ClassDoc) -> GenResult<String> {
    let name = normalize_class_name(&class.name);
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if !valid {
        return Err(GenError::empty_identifier("<class>", &class.name));
    }
    Ok(name)
}

/// One `<signature>` block per overload that takes parameters
fn emit_signature_doc(w: &mut CodeWriter, signature: &SignatureDoc) {
    if signature.params.is_empty() {
        return;
    }

    w.line("/// <signature>");
    for param in &signature.params {
        let ty = param
            .ty
            .as_deref()
            .map(|ty| format!(" type=\"{}\"", normalize_module_name(ty)))
            .unwrap_or_default();
        let desc = param.desc.as_deref().map(to_doc_comment).unwrap_or_default();
        w.line(format!(
            "/// <param name=\"{}\"{}>{}</param>",
            param.name, ty, desc
        ));
    }

    if let Some(returns) = signature.returns.as_ref().filter(|r| !r.is_empty()) {
        let ty = returns
            .ty
            .as_deref()
            .map(|ty| format!(" type=\"{}\"", normalize_module_name(ty)))
            .unwrap_or_default();
        let desc = returns.desc.as_deref().map(to_doc_comment).unwrap_or_default();
        w.line(format!("/// <returns{}>{}</returns>", ty, desc));
    }
    w.line("/// </signature>");
}

fn emit_property(
    w: &mut CodeWriter,
    container_name: &str,
    property: &PropertyDoc,
    specializer: Option<&dyn PropertySpecializer>,
) -> GenResult<()> {
    let name = identifier(container_name, &property.name)?;
    let desc = property.desc.as_deref().unwrap_or_default();

    if property.desc.is_some() {
        w.line(format!(
            "/// <field name='{}'>{}</field>",
            property.name,
            to_doc_comment(desc)
        ));
    }

    let value = infer_default(
        &property.name,
        desc,
        property.text_raw.as_deref().unwrap_or_default(),
        specializer,
    );
    w.line(format!("this.{} = {};", name, value));
    Ok(())
}

/// Listener-management stubs, all documented with the supported event names
fn emit_events(w: &mut CodeWriter, events: &[EventDoc]) {
    let listed: Vec<&EventDoc> = events.iter().filter(|e| e.is_listable()).collect();

    let mut full_doc = vec![
        "/// <summary>".to_string(),
        "/// Supported events: &#10;".to_string(),
    ];
    for event in &listed {
        let summary = event
            .desc
            .as_deref()
            .map(|desc| format!(": {}", to_plain_summary(desc)))
            .unwrap_or_default();
        full_doc.push(format!("/// {}{}&#10;", event.name, summary));
    }
    full_doc.push("/// </summary>".to_string());

    let names: Vec<&str> = listed.iter().map(|e| e.name.as_str()).collect();
    let short_doc = vec![format!(
        "/// <summary>Supported Events: {}</summary>",
        names.join(", ")
    )];

    let stubs: [(&str, &str, &[String]); 7] = [
        ("addListener", "event, listener", full_doc.as_slice()),
        ("once", "event, listener", full_doc.as_slice()),
        ("removeListener", "event, listener", short_doc.as_slice()),
        ("removeAllListeners", "event", short_doc.as_slice()),
        ("listeners", "event", short_doc.as_slice()),
        ("setMaxListeners", "n", &[]),
        ("emit", "event, args", full_doc.as_slice()),
    ];
    for (name, params, doc) in stubs {
        emit_listener_stub(w, name, params, doc);
    }
    emit_listener_stub(w, "on", "event, listener", &full_doc);
}

fn emit_listener_stub(w: &mut CodeWriter, name: &str, params: &str, doc: &[String]) {
    if doc.is_empty() {
        w.line(format!("this.{} = function({}) {{ }}", name, params));
        return;
    }
    w.line(format!("this.{} = function({}) {{", name, params));
    {
        let mut body = w.indent();
        for line in doc {
            body.line(line);
        }
    }
    w.line("}");
}
