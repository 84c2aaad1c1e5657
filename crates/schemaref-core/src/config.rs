//! Configuration for reference resolution.

use serde::{Deserialize, Serialize};

/// `$schema` stamped on every definitions document unless overridden.
///
/// `$defs` is a 2019-09+ keyword, so the default targets 2020-12.
pub const DEFAULT_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Options for a single resolution request.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-depth`, `max-nodes`).
/// Missing fields fall back to [`ResolveOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResolveOptions {
    /// Maximum object/array nesting depth within any one definition body.
    /// Reference hops do not count. `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Maximum number of nodes copied across all definitions of one root.
    /// `None` means unbounded (default).
    pub max_nodes: Option<usize>,
    /// Value of the `$schema` keyword on the produced document.
    pub draft: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(256),
            max_nodes: None,
            draft: DEFAULT_DRAFT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_options_serde_round_trip() {
        let opts = ResolveOptions {
            max_depth: Some(12),
            max_nodes: Some(1000),
            draft: "http://json-schema.org/draft-07/schema#".to_string(),
        };

        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"max-depth\""));
        assert!(json.contains("\"max-nodes\""));

        let deserialized: ResolveOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, opts);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let opts: ResolveOptions = serde_json::from_str(r#"{ "max-nodes": 5 }"#).unwrap();
        assert_eq!(opts.max_depth, Some(256));
        assert_eq!(opts.max_nodes, Some(5));
        assert_eq!(opts.draft, DEFAULT_DRAFT);
    }
}
