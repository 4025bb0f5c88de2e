//! Flattened key paths for diagnostics.
//!
//! A flattened path joins raw key segments with `.`. Literal `.` (and the
//! escape character `\` itself) inside a segment are backslash-escaped, so
//! `{"a.b": {"c": 1}}` flattens to `a\.b.c` while `{"a": {"b": {"c": 1}}}`
//! flattens to `a.b.c`.

use std::collections::BTreeSet;

use crate::tree::TranslationTree;

/// Segment separator used in flattened key paths.
pub const KEY_SEPARATOR: char = '.';

const ESCAPE: char = '\\';

/// Escapes one raw key segment.
#[must_use]
pub fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for ch in segment.chars() {
        if ch == KEY_SEPARATOR || ch == ESCAPE {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Splits a flattened path back into its raw segments.
///
/// # Examples
/// ```
/// use translation_reducer::keys::split_key_path;
///
/// assert_eq!(split_key_path(r"a\.b.c"), vec!["a.b".to_string(), "c".to_string()]);
/// ```
#[must_use]
pub fn split_key_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            KEY_SEPARATOR => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);

    segments
}

/// Collects the flattened path of every leaf in `tree`.
///
/// Nested mappings are descended; any other value ends a path. Empty
/// mappings contribute nothing, and a leaf at the root has no path.
#[must_use]
pub fn flatten_keys(tree: &TranslationTree) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    collect_keys(tree, None, &mut result);
    result
}

fn collect_keys(tree: &TranslationTree, prefix: Option<&str>, result: &mut BTreeSet<String>) {
    match tree {
        TranslationTree::Mapping(entries) => {
            for (key, value) in entries {
                let escaped = escape_segment(key);
                let full_key = prefix
                    .map_or_else(|| escaped.clone(), |p| format!("{p}{KEY_SEPARATOR}{escaped}"));
                collect_keys(value, Some(&full_key), result);
            }
        }
        TranslationTree::Leaf(_) => {
            if let Some(key) = prefix {
                result.insert(key.to_string());
            }
        }
    }
}
