//! JSON Pointer (RFC 6901) lookup used by the `get_at` accessors.

use serde_json::Value;

use crate::error::JsonError;

/// Unescapes a pointer component: `~1` becomes `/`, `~0` becomes `~`.
fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first so that "~01" decodes to "~1"
    component.replace("~1", "/").replace("~0", "~")
}

/// Splits a pointer into unescaped path steps.
///
/// # Errors
///
/// [`JsonError::InvalidPointer`] when a non-empty pointer lacks the leading `/`.
pub(crate) fn parse_pointer(pointer: &str) -> Result<Vec<String>, JsonError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(JsonError::InvalidPointer(pointer.to_string()));
    };
    Ok(rest.split('/').map(unescape_component).collect())
}

/// Canonical array index: ASCII digits, no leading zero unless exactly "0".
pub(crate) fn parse_index(step: &str) -> Option<usize> {
    let bytes = step.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    step.parse().ok()
}

/// Walks `path` from `root`. Returns `None` when any step is missing.
pub(crate) fn walk<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get(parse_index(step)?)?,
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}
