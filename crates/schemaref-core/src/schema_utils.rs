//! JSON Pointer helpers used to label reference sites in diagnostics.

use std::borrow::Cow;

/// Escape a single path segment per RFC 6901 (`~` → `~0`, `/` → `~1`).
///
/// Returns `Cow::Borrowed` when no escaping is needed.
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Append one escaped segment to a JSON Pointer.
///
/// ```
/// use schemaref_core::build_path;
/// assert_eq!(build_path("#/properties", "a/b"), "#/properties/a~1b");
/// ```
pub fn build_path(parent: &str, segment: &str) -> String {
    let escaped = escape_pointer_segment(segment);
    let mut path = String::with_capacity(parent.len() + escaped.len() + 1);
    path.push_str(parent);
    path.push('/');
    path.push_str(&escaped);
    path
}
