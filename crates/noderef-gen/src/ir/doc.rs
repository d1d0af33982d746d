//! Documentation entries for modules, classes and their members
//!
//! Every optional facet is an `Option`: `None` means the key was absent and
//! nothing is emitted for it, while `Some(vec![])` still emits the facet's
//! scaffolding (an empty `events` list still produces the listener stubs).

use serde::{Deserialize, Serialize};

/// A documented module, or a global object of the same shape
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModuleDoc {
    /// Raw documented name (e.g. "tls_(ssl)")
    pub name: String,

    /// HTML description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<MethodDoc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventDoc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyDoc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<ClassDoc>>,
}

impl ModuleDoc {
    /// Create a module with no facets
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the HTML description
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Add a method
    pub fn method(mut self, method: MethodDoc) -> Self {
        self.methods.get_or_insert_with(Vec::new).push(method);
        self
    }

    /// Add an event
    pub fn event(mut self, event: EventDoc) -> Self {
        self.events.get_or_insert_with(Vec::new).push(event);
        self
    }

    /// Add a property
    pub fn property(mut self, property: PropertyDoc) -> Self {
        self.properties.get_or_insert_with(Vec::new).push(property);
        self
    }

    /// Add a class
    pub fn class(mut self, class: ClassDoc) -> Self {
        self.classes.get_or_insert_with(Vec::new).push(class);
        self
    }

    /// Whether any member facet is present.
    ///
    /// Globals are only declared when this holds.
    pub fn has_members(&self) -> bool {
        self.methods.is_some()
            || self.events.is_some()
            || self.properties.is_some()
            || self.classes.is_some()
    }
}

/// A class declared inside a module. Classes do not nest further.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassDoc {
    /// Raw documented name (e.g. "net.Server")
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<MethodDoc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventDoc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyDoc>>,
}

impl ClassDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn method(mut self, method: MethodDoc) -> Self {
        self.methods.get_or_insert_with(Vec::new).push(method);
        self
    }

    pub fn event(mut self, event: EventDoc) -> Self {
        self.events.get_or_insert_with(Vec::new).push(event);
        self
    }

    pub fn property(mut self, property: PropertyDoc) -> Self {
        self.properties.get_or_insert_with(Vec::new).push(property);
        self
    }
}

/// A documented method with one or more overloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Overloads; the first one defines the generated parameter list
    pub signatures: Vec<SignatureDoc>,
}

impl MethodDoc {
    /// Create a method with no signatures
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: None,
            signatures: Vec::new(),
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Add an overload
    pub fn signature(mut self, signature: SignatureDoc) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Whether this method follows the `createX` factory naming convention
    pub fn factory_target(&self) -> Option<&str> {
        self.name
            .strip_prefix("create")
            .filter(|target| !target.is_empty())
    }
}

/// One overload of a method
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignatureDoc {
    pub params: Vec<ParamDoc>,

    #[serde(
        rename = "return",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub returns: Option<ReturnDoc>,
}

impl SignatureDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: ParamDoc) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, returns: ReturnDoc) -> Self {
        self.returns = Some(returns);
        self
    }

    /// Parameters that become positional arguments of the generated stub.
    ///
    /// Stops at the variadic marker `...`.
    pub fn positional_params(&self) -> impl Iterator<Item = &ParamDoc> {
        self.params.iter().take_while(|p| !p.is_variadic())
    }
}

/// A documented parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// Parameter name marking a variadic tail
pub const VARIADIC_PARAM: &str = "...";

impl ParamDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            desc: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn is_variadic(&self) -> bool {
        self.name == VARIADIC_PARAM
    }
}

/// Return type and description of a signature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReturnDoc {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl ReturnDoc {
    pub fn is_empty(&self) -> bool {
        self.ty.is_none() && self.desc.is_none()
    }
}

/// A documented property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Raw signature text, e.g. "`isTTY` {Boolean}"
    #[serde(rename = "textRaw", default, skip_serializing_if = "Option::is_none")]
    pub text_raw: Option<String>,
}

impl PropertyDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: None,
            text_raw: None,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_text_raw(mut self, text_raw: impl Into<String>) -> Self {
        self.text_raw = Some(text_raw.into());
        self
    }
}

/// A documented event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl EventDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: None,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Event names containing a space are prose headings, not emit-able names
    pub fn is_listable(&self) -> bool {
        !self.name.contains(' ')
    }
}
