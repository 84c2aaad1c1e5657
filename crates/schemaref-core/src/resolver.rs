//! Reference resolution over a [`SchemaTable`].
//!
//! Two modes are provided:
//!
//! * [`inline_resolve`] substitutes every local `$ref` with the raw target
//!   schema, one level deep.
//! * [`resolve_to_definitions`] computes the transitive reference closure of
//!   a root and emits each reachable schema exactly once into a `$defs` table,
//!   rewriting references into local pointers. Cycles of any length collapse
//!   into finite documents because recursion is keyed on schema *names*.
//!
//! ## Definitions mode
//!
//! Each name moves through `unseen → in-progress → done` (or `absent`, when
//! its body is itself a reference chain ending at a missing schema). The
//! state is checked at every reference site:
//!
//! | target state   | rewrite                                    |
//! |----------------|--------------------------------------------|
//! | root, while copying the root | `{"$ref": "#"}`              |
//! | unseen, in table | schedule it, then `#/$defs/<name>`       |
//! | unseen, missing  | drop the node (soft warning)             |
//! | in-progress / done | `#/$defs/<name>`                       |
//! | absent         | drop the node                              |
//!
//! Scheduled names are copied from a worklist after the root body, one at a
//! time. Recursion only follows the nesting of a single body, so the depth
//! limit and the call stack are independent of how long reference chains get.
//!
//! Foreign references (anything not under `#/components/schemas/`) are
//! copied verbatim.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ResolveOptions;
use crate::document::DefinitionsDocument;
use crate::error::ResolveError;
use crate::reference::{classify, defs_ref, local_ref_name, root_anchor, Reference};
use crate::result::Resolution;
use crate::schema_utils::build_path;
use crate::table::SchemaTable;

// ---------------------------------------------------------------------------
// Inline mode
// ---------------------------------------------------------------------------

/// Replace every local reference in `schema` with the raw schema it names.
///
/// The substitution is a single level: the inserted schema is not walked, so
/// references it contains stay as they are. Re-applying this function to its
/// own output follows reference chains one hop per call and never reaches a
/// fixed point on a cycle (even a self-reference); use
/// [`resolve_to_definitions`] for a complete expansion.
///
/// A reference to a name missing from `table` yields an absent value: the key
/// holding it is dropped, an array slot becomes `null`, and `None` is returned
/// when `schema` itself is such a reference.
pub fn inline_resolve(schema: &Value, table: &SchemaTable) -> Option<Value> {
    match classify(schema) {
        Some(Reference::Local(name)) => {
            let found = table.find(name).cloned();
            if found.is_none() {
                tracing::warn!(name, "Inline substitution of unknown schema dropped");
            }
            found
        }
        Some(Reference::Foreign(_)) => Some(schema.clone()),
        None => match schema {
            Value::Object(obj) => {
                let mut out = Map::with_capacity(obj.len());
                for (key, child) in obj {
                    if let Some(v) = inline_resolve(child, table) {
                        out.insert(key.clone(), v);
                    }
                }
                Some(Value::Object(out))
            }
            Value::Array(arr) => Some(Value::Array(
                arr.iter()
                    .map(|item| inline_resolve(item, table).unwrap_or(Value::Null))
                    .collect(),
            )),
            other => Some(other.clone()),
        },
    }
}

/// Rendered inline expansion, `{ ok, text }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineText {
    pub ok: bool,
    /// Indented JSON on success, the error description otherwise.
    pub text: String,
}

/// [`inline_resolve`] followed by pretty-printing. An absent result renders
/// as `null`.
pub fn format_inline(schema: &Value, table: &SchemaTable) -> InlineText {
    let inlined = inline_resolve(schema, table).unwrap_or(Value::Null);
    match serde_json::to_string_pretty(&inlined) {
        Ok(text) => InlineText { ok: true, text },
        Err(e) => InlineText {
            ok: false,
            text: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Definitions mode
// ---------------------------------------------------------------------------

/// Resolve `root_schema` (named `root_name`) into a self-contained
/// definitions document.
///
/// Never fails: errors are reported as [`Resolution::Failed`]. A reference
/// to an unknown name is not an error; the reference site is omitted and the
/// name is listed in [`DefinitionsDocument::missing_refs`].
///
/// The table is only read, so one table may serve concurrent calls.
pub fn resolve_to_definitions(
    root_name: &str,
    root_schema: &Value,
    table: &SchemaTable,
    options: &ResolveOptions,
) -> Resolution {
    let result = try_resolve_to_definitions(root_name, root_schema, table, options);
    if let Err(e) = &result {
        tracing::warn!(root = root_name, error = %e, "Resolution failed");
    }
    Resolution::from(result)
}

/// Fallible core of [`resolve_to_definitions`].
pub fn try_resolve_to_definitions(
    root_name: &str,
    root_schema: &Value,
    table: &SchemaTable,
    options: &ResolveOptions,
) -> Result<DefinitionsDocument, ResolveError> {
    tracing::debug!(root = root_name, "Resolving schema to definitions");

    let mut ctx = Materializer {
        table,
        root: root_name,
        options,
        states: HashMap::new(),
        pending: VecDeque::new(),
        defs: Map::new(),
        missing_refs: Vec::new(),
        nodes: 0,
    };

    ctx.states.insert(root_name.to_string(), DefState::InProgress);
    let root_path = build_path("#/$defs", root_name);
    // An absent root (nothing but a dangling reference) keeps `$ref` valid
    // as the empty schema.
    let root_body = ctx
        .rewrite(root_schema, root_name, &root_path, 0)?
        .unwrap_or_else(|| Value::Object(Map::new()));

    while let Some(name) = ctx.pending.pop_front() {
        ctx.materialize(&name)?;
    }

    let Materializer {
        mut defs,
        mut missing_refs,
        ..
    } = ctx;
    defs.insert(root_name.to_string(), root_body);

    missing_refs.sort();
    missing_refs.dedup();

    tracing::debug!(
        root = root_name,
        defs = defs.len(),
        missing = missing_refs.len(),
        "Resolved schema"
    );

    Ok(DefinitionsDocument {
        draft: options.draft.clone(),
        root: root_name.to_string(),
        defs,
        missing_refs,
    })
}

/// Resolve every entry of `table` as its own root, in display order.
///
/// Each root gets a fresh definitions table; a failure in one does not
/// affect the others.
pub fn resolve_all(table: &SchemaTable, options: &ResolveOptions) -> Vec<(String, Resolution)> {
    table
        .entries()
        .iter()
        .map(|entry| {
            let resolution = resolve_to_definitions(&entry.name, &entry.schema, table, options);
            (entry.name.clone(), resolution)
        })
        .collect()
}

/// Materialization progress of a schema name within one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefState {
    /// Scheduled or being copied; its `$defs` entry is guaranteed.
    InProgress,
    Done,
    /// The body reduced to a dangling reference; nothing is emitted.
    Absent,
}

/// Per-call state of one definitions-mode resolution.
struct Materializer<'a> {
    table: &'a SchemaTable,
    root: &'a str,
    options: &'a ResolveOptions,
    states: HashMap<String, DefState>,
    /// Names scheduled but not yet copied, in discovery order.
    pending: VecDeque<String>,
    /// Finished entries in completion order.
    defs: Map<String, Value>,
    missing_refs: Vec<String>,
    nodes: usize,
}

impl Materializer<'_> {
    /// Copy the table entry `name` into `defs`. Depth is counted from the
    /// entry's own body.
    fn materialize(&mut self, name: &str) -> Result<(), ResolveError> {
        let table = self.table;
        let Some(schema) = table.find(name) else {
            return Ok(());
        };

        let path = build_path("#/$defs", name);
        // Scheduled bodies never reduce to absent: alias chains were settled
        // by `schedule`.
        let body = self
            .rewrite(schema, name, &path, 0)?
            .unwrap_or_else(|| Value::Object(Map::new()));
        self.defs.insert(name.to_string(), body);
        self.states.insert(name.to_string(), DefState::Done);
        Ok(())
    }

    /// Deep-copy `node`, rewriting references. `None` means the node is absent.
    fn rewrite(
        &mut self,
        node: &Value,
        current: &str,
        path: &str,
        depth: usize,
    ) -> Result<Option<Value>, ResolveError> {
        self.visit(path, depth)?;

        match classify(node) {
            Some(Reference::Local(target)) => Ok(self.rewrite_local(target, current, path)),
            Some(Reference::Foreign(target)) => {
                tracing::debug!(path, target, "Passing through foreign reference");
                Ok(Some(node.clone()))
            }
            None => match node {
                Value::Object(obj) => {
                    let mut out = Map::with_capacity(obj.len());
                    for (key, child) in obj {
                        let child_path = build_path(path, key);
                        if let Some(v) = self.rewrite(child, current, &child_path, depth + 1)? {
                            out.insert(key.clone(), v);
                        }
                    }
                    Ok(Some(Value::Object(out)))
                }
                Value::Array(arr) => {
                    let mut out = Vec::with_capacity(arr.len());
                    for (i, item) in arr.iter().enumerate() {
                        let child_path = build_path(path, &i.to_string());
                        let v = self.rewrite(item, current, &child_path, depth + 1)?;
                        out.push(v.unwrap_or(Value::Null));
                    }
                    Ok(Some(Value::Array(out)))
                }
                scalar => Ok(Some(scalar.clone())),
            },
        }
    }

    fn rewrite_local(&mut self, target: &str, current: &str, path: &str) -> Option<Value> {
        if target == current && current == self.root {
            return Some(root_anchor());
        }

        match self.states.get(target).copied() {
            Some(DefState::InProgress | DefState::Done) => Some(defs_ref(target)),
            Some(DefState::Absent) => None,
            None => self.schedule(target, path).then(|| defs_ref(target)),
        }
    }

    /// First sighting of `name`: follow the chain of schemas whose whole body
    /// is another local reference, then schedule every name on it. Returns
    /// `false` when the chain ends at a missing schema; every name on it is
    /// then absent.
    fn schedule(&mut self, name: &str, path: &str) -> bool {
        let table = self.table;
        let mut chain = vec![name.to_string()];

        let present = loop {
            let Some(last) = chain.last() else {
                break false;
            };
            let Some(schema) = table.find(last) else {
                tracing::warn!(path, name = last.as_str(), "Dangling reference omitted");
                self.missing_refs.push(last.clone());
                chain.pop();
                break false;
            };
            let Some(next) = local_ref_name(schema) else {
                break true;
            };
            match self.states.get(next) {
                Some(DefState::Absent) => break false,
                Some(DefState::InProgress | DefState::Done) => break true,
                None if chain.iter().any(|n| n == next) => break true,
                None => chain.push(next.to_string()),
            }
        };

        let state = if present {
            DefState::InProgress
        } else {
            DefState::Absent
        };
        for n in chain {
            if present {
                tracing::debug!(path, name = n.as_str(), "Scheduling definition");
                self.pending.push_back(n.clone());
            }
            self.states.insert(n, state);
        }
        present
    }

    /// Enforce the configured depth and node caps.
    fn visit(&mut self, path: &str, depth: usize) -> Result<(), ResolveError> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(ResolveError::DepthExceeded {
                    path: path.to_string(),
                    max_depth,
                });
            }
        }
        self.nodes += 1;
        if let Some(max_nodes) = self.options.max_nodes {
            if self.nodes > max_nodes {
                return Err(ResolveError::NodeLimitExceeded {
                    path: path.to_string(),
                    max_nodes,
                });
            }
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
