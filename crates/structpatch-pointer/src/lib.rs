//! Typed patch paths and JSON Pointer (RFC 6901) helpers.
//!
//! Patch paths are sequences of [`PathStep`]s. On the wire they travel as
//! arrays of strings and integers, and for display or compatibility they can
//! be rendered as [JSON Pointers](https://tools.ietf.org/html/rfc6901).
//!
//! # Example
//!
//! ```
//! use structpatch_pointer::{format_json_pointer, parse_json_pointer, PathStep};
//!
//! let path = parse_json_pointer("/todos/0/title");
//! assert_eq!(
//!     path,
//!     vec![PathStep::from("todos"), PathStep::Index(0), PathStep::from("title")]
//! );
//! assert_eq!(format_json_pointer(&path), "/todos/0/title");
//! ```

pub mod types;
pub use types::{Path, PathStep};

pub mod validate;
pub use validate::{validate_json_pointer, validate_path, ValidationError, MAX_PATH_LENGTH};

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use structpatch_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use structpatch_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parses a JSON Pointer string into a path.
///
/// The empty string is the root path. Canonical integer segments become
/// [`PathStep::Index`], all others [`PathStep::Key`].
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..]
        .split('/')
        .map(|segment| PathStep::from_segment(unescape_component(segment)))
        .collect()
}

/// Formats a path as a JSON Pointer string.
///
/// Returns an empty string for the root path.
pub fn format_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(&escape_component(&step.to_key()));
    }
    out
}

/// Check if a string represents a canonical non-negative integer index.
///
/// ```
/// use structpatch_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}
