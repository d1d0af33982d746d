//! Default-value inference for documented properties
//!
//! A property stub needs some runtime value so static tooling can infer its
//! type. The value is guessed from the description's `<code>Type</code>`
//! hints, then from the `{Type}` token in the raw signature, then from a
//! per-container specializer, and finally falls back to `undefined`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// `{Type}` token in a raw property signature
    static ref TYPE_TOKEN_REGEX: Regex = Regex::new(r"\{([^}]*)\}").unwrap();
}

pub const TRUE_LITERAL: &str = "true";
pub const ZERO_LITERAL: &str = "0";
pub const UNDEFINED_LITERAL: &str = "undefined";
pub const READABLE_STREAM_LITERAL: &str = "require('stream').Readable()";
pub const WRITABLE_STREAM_LITERAL: &str = "require('stream').Writable()";

/// Raw signature of the one stream documented without a type hint
pub const STDERR_SIGNATURE: &str = "process.stderr";

/// Container name of the `process` global
pub const PROCESS_CONTAINER: &str = "__process";

/// Supplies literals for specific property names of one container
pub trait PropertySpecializer: Send + Sync {
    /// Literal for `property`, or `None` to fall through to `undefined`
    fn specialize(&self, property: &str) -> Option<String>;
}

impl<F> PropertySpecializer for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn specialize(&self, property: &str) -> Option<String> {
        self(property)
    }
}

/// Runtime environment the `process` stub pretends to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeProfile {
    pub node_version: String,
    pub v8_version: String,
    pub platform: String,
}

impl Default for RuntimeProfile {
    fn default() -> Self {
        Self {
            node_version: "0.10.0".to_string(),
            v8_version: "3.14.5.8".to_string(),
            platform: "win32".to_string(),
        }
    }
}

/// Specializer for the `process` global
#[derive(Debug, Clone, Default)]
pub struct ProcessSpecializer {
    profile: RuntimeProfile,
}

impl ProcessSpecializer {
    pub fn new(profile: RuntimeProfile) -> Self {
        Self { profile }
    }
}

impl PropertySpecializer for ProcessSpecializer {
    fn specialize(&self, property: &str) -> Option<String> {
        let literal = match property {
            "env" => "{}".to_string(),
            "versions" => format!(
                "{{node: '{}', v8: '{}'}}",
                self.profile.node_version, self.profile.v8_version
            ),
            "pid" => "0".to_string(),
            "title" => "''".to_string(),
            "platform" => format!("'{}'", self.profile.platform),
            "maxTickDepth" => "1000".to_string(),
            "argv" => "[ 'node.exe' ]".to_string(),
            _ => return None,
        };
        Some(literal)
    }
}

/// Specializers keyed by container name
#[derive(Default)]
pub struct SpecializerRegistry {
    entries: HashMap<String, Box<dyn PropertySpecializer>>,
}

impl SpecializerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `process` specializer for the given profile
    pub fn with_defaults(profile: RuntimeProfile) -> Self {
        Self::new().register(PROCESS_CONTAINER, ProcessSpecializer::new(profile))
    }

    /// Register a specializer for a container, replacing any previous one
    pub fn register(
        mut self,
        container: impl Into<String>,
        specializer: impl PropertySpecializer + 'static,
    ) -> Self {
        self.entries.insert(container.into(), Box::new(specializer));
        self
    }

    /// Specializer registered for `container`
    pub fn get(&self, container: &str) -> Option<&dyn PropertySpecializer> {
        self.entries.get(container).map(|s| s.as_ref())
    }
}

impl std::fmt::Debug for SpecializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Infer a default value literal for a property.
pub fn infer_default(
    name: &str,
    desc: &str,
    text_raw: &str,
    specializer: Option<&dyn PropertySpecializer>,
) -> String {
    if let Some(literal) = from_description(desc, text_raw) {
        return literal.to_string();
    }
    if let Some(literal) = from_type_token(text_raw) {
        return literal.to_string();
    }
    specializer
        .and_then(|s| s.specialize(name))
        .unwrap_or_else(|| UNDEFINED_LITERAL.to_string())
}

fn from_description(desc: &str, text_raw: &str) -> Option<&'static str> {
    if desc.contains("<code>Boolean</code>") {
        Some(TRUE_LITERAL)
    } else if desc.contains("<code>Number</code>") {
        Some(ZERO_LITERAL)
    } else if desc.contains("<code>Readable Stream</code>") {
        Some(READABLE_STREAM_LITERAL)
    } else if desc.contains("<code>Writable Stream</code>") || text_raw == STDERR_SIGNATURE {
        Some(WRITABLE_STREAM_LITERAL)
    } else {
        None
    }
}

fn from_type_token(text_raw: &str) -> Option<&'static str> {
    let captures = TYPE_TOKEN_REGEX.captures(text_raw)?;
    match captures[1].trim() {
        "Boolean" => Some(TRUE_LITERAL),
        "Number" => Some(ZERO_LITERAL),
        _ => None,
    }
}
