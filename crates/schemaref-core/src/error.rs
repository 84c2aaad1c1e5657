//! Error types for document import and reference resolution.

use thiserror::Error;

use crate::import::DocumentKind;

/// Failure while materializing a single root schema.
///
/// Never escapes [`crate::resolve_to_definitions`]; it is folded into a
/// [`crate::Resolution::Failed`] for that root only.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Maximum depth exceeded at {path} (max: {max_depth})")]
    DepthExceeded { path: String, max_depth: usize },

    #[error("Node limit exceeded at {path} (max: {max_nodes})")]
    NodeLimitExceeded { path: String, max_nodes: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResolveError {
    /// Stable machine-readable tag used in serialized error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::DepthExceeded { .. } => "depth_exceeded",
            ResolveError::NodeLimitExceeded { .. } => "node_limit_exceeded",
            ResolveError::Serialization(_) => "serialization",
        }
    }
}

/// Failure while turning input text into a schema collection.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAMLException: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Input is empty")]
    Empty,

    #[error("Invalid input. Seems to be {found} ...")]
    NotAnObject { found: String },

    #[error("Document has no components.schemas object")]
    MissingComponents,

    #[error("{0} documents are not supported yet")]
    UnsupportedDocument(DocumentKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_kinds_are_stable() {
        let depth = ResolveError::DepthExceeded {
            path: "#/properties/a".to_string(),
            max_depth: 3,
        };
        assert_eq!(depth.kind(), "depth_exceeded");
        assert_eq!(
            depth.to_string(),
            "Maximum depth exceeded at #/properties/a (max: 3)"
        );

        let nodes = ResolveError::NodeLimitExceeded {
            path: "#".to_string(),
            max_nodes: 10,
        };
        assert_eq!(nodes.kind(), "node_limit_exceeded");
    }

    #[test]
    fn test_import_error_messages() {
        let err = ImportError::NotAnObject {
            found: "a string".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid input. Seems to be a string ...");

        let err = ImportError::UnsupportedDocument(DocumentKind::JsonSchema);
        assert_eq!(
            err.to_string(),
            "JSON Schema documents are not supported yet"
        );
    }
}
