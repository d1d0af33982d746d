//! Error types and diagnostics
//!
//! Fatal conditions abort a generation pass with a [`GenError`]. Recoverable
//! ones are logged and collected as [`Diagnostic`]s next to the artifacts.

use thiserror::Error;

use crate::text::HtmlError;

/// Result type for noderef-gen operations
pub type GenResult<T> = Result<T, GenError>;

/// Fatal generation errors
#[derive(Debug, Error)]
pub enum GenError {
    /// The documentation tree could not be deserialized
    #[error("Malformed documentation tree: {0}")]
    Json(#[from] serde_json::Error),

    /// A method carries an empty `signatures` list
    #[error("Method `{method}` in `{container}` has no signatures")]
    MissingSignatures { container: String, method: String },

    /// A documented name has no identifier-safe prefix
    #[error("`{raw}` in `{container}` does not yield a valid identifier")]
    EmptyIdentifier { container: String, raw: String },

    /// The doc table could not be rendered
    #[error("Doc table serialization error: {0}")]
    DocTable(String),
}

impl GenError {
    /// Create an empty-identifier error
    pub fn empty_identifier(container: impl Into<String>, raw: impl Into<String>) -> Self {
        GenError::EmptyIdentifier {
            container: container.into(),
            raw: raw.into(),
        }
    }
}

/// A recoverable condition noticed while generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A description fragment failed to parse and was replaced by an empty string
    UnparseableDescription { context: String, error: HtmlError },

    /// A `createX` method refers to a class `X` its container does not declare
    MissingFactoryTarget {
        container: String,
        method: String,
        class: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnparseableDescription { context, error } => {
                write!(f, "description of `{}` dropped: {}", context, error)
            }
            Diagnostic::MissingFactoryTarget {
                container,
                method,
                class,
            } => write!(
                f,
                "`{}.{}` constructs `{}`, which `{}` does not declare",
                container, method, class, container
            ),
        }
    }
}

/// Collects diagnostics for one generation pass
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GenError::MissingSignatures {
            container: "fs".into(),
            method: "open".into(),
        };
        assert_eq!(err.to_string(), "Method `open` in `fs` has no signatures");

        let err = GenError::empty_identifier("fs", "(ssl)");
        assert!(err.to_string().contains("(ssl)"));
    }

    #[test]
    fn test_diagnostics_collect_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.push(Diagnostic::MissingFactoryTarget {
            container: "util".into(),
            method: "createThing".into(),
            class: "Thing".into(),
        });
        diagnostics.push(Diagnostic::UnparseableDescription {
            context: "fs".into(),
            error: HtmlError::UnterminatedComment { offset: 3 },
        });

        let items = diagnostics.into_vec();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].to_string(),
            "`util.createThing` constructs `Thing`, which `util` does not declare"
        );
        assert!(items[1].to_string().starts_with("description of `fs` dropped"));
    }
}
