//! Translation tree representation and deep-merge rules.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A nested translation structure.
///
/// `Leaf` never holds a JSON object: objects are always lifted into `Mapping`
/// by [`TranslationTree::from`]. Arrays and `null` are leaves and are replaced
/// whole on merge.
///
/// Keys are kept in a `BTreeMap` so serialization is key-sorted no matter
/// which order the source files listed them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranslationTree {
    Mapping(BTreeMap<String, TranslationTree>),
    Leaf(Value),
}

impl TranslationTree {
    /// An empty mapping.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Mapping(BTreeMap::new())
    }

    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            Self::Leaf(_) => None,
        }
    }

    /// Child entry for `key`, if this is a mapping that contains it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// Walks raw (unescaped) key segments down the tree.
    #[must_use]
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Self> {
        segments.iter().try_fold(self, |node, segment| node.get(segment.as_ref()))
    }

    /// Converts back into a plain JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Mapping(entries) => Value::Object(
                entries.into_iter().map(|(key, value)| (key, value.into_value())).collect(),
            ),
            Self::Leaf(value) => value,
        }
    }
}

impl Default for TranslationTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for TranslationTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
            other => Self::Leaf(other),
        }
    }
}

/// Deep-merges `overlay` on top of `base` and returns the combined tree.
///
/// Keys present on both sides recurse only when both values are mappings.
/// For every other collision, including a mapping meeting a leaf, the overlay
/// value replaces the base value entirely.
#[must_use]
pub fn deep_merge(base: TranslationTree, overlay: TranslationTree) -> TranslationTree {
    match (base, overlay) {
        (TranslationTree::Mapping(mut target), TranslationTree::Mapping(source)) => {
            for (key, value) in source {
                let merged = match target.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                target.insert(key, merged);
            }
            TranslationTree::Mapping(target)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn tree(value: Value) -> TranslationTree {
        TranslationTree::from(value)
    }

    #[googletest::test]
    fn from_value_lifts_nested_objects() {
        let result = tree(json!({ "a": { "b": "x" }, "list": [{ "c": 1 }] }));

        expect_that!(result.get("a").is_some_and(TranslationTree::is_mapping), eq(true));
        expect_that!(result.get_path(&["a", "b"]), some(eq(&TranslationTree::Leaf(json!("x")))));
        expect_that!(result.get("list"), some(eq(&TranslationTree::Leaf(json!([{ "c": 1 }])))));
    }

    #[rstest]
    fn deep_merge_recurses_into_shared_mappings() {
        let base = tree(json!({ "common": { "hello": "Hello", "bye": "Bye" } }));
        let overlay = tree(json!({ "common": { "hello": "Hi" }, "extra": true }));

        let merged = deep_merge(base, overlay);

        assert_eq!(
            merged.into_value(),
            json!({ "common": { "hello": "Hi", "bye": "Bye" }, "extra": true })
        );
    }

    #[rstest]
    #[case::leaf_replaces_mapping(json!({ "a": { "b": 1 } }), json!({ "a": "flat" }), json!({ "a": "flat" }))]
    #[case::mapping_replaces_leaf(json!({ "a": "flat" }), json!({ "a": { "b": 1 } }), json!({ "a": { "b": 1 } }))]
    #[case::array_replaced_whole(json!({ "a": [1, 2, 3] }), json!({ "a": [9] }), json!({ "a": [9] }))]
    #[case::null_overrides(json!({ "a": "x" }), json!({ "a": null }), json!({ "a": null }))]
    #[case::empty_overlay(json!({ "a": 1 }), json!({}), json!({ "a": 1 }))]
    fn deep_merge_collisions(#[case] base: Value, #[case] overlay: Value, #[case] expected: Value) {
        let merged = deep_merge(tree(base), tree(overlay));

        assert_eq!(merged.into_value(), expected);
    }

    #[rstest]
    fn deep_merge_disjoint_keys_is_order_independent() {
        let left = tree(json!({ "a": { "x": 1 }, "b": 2 }));
        let right = tree(json!({ "a": { "y": 3 }, "c": 4 }));

        let forward = deep_merge(left.clone(), right.clone());
        let backward = deep_merge(right, left);

        assert_eq!(forward, backward);
        assert_eq!(forward.into_value(), json!({ "a": { "x": 1, "y": 3 }, "b": 2, "c": 4 }));
    }

    #[rstest]
    fn self_merge_is_identity() {
        let base = tree(json!({ "x": 1, "nested": { "y": [1, 2] } }));

        assert_eq!(deep_merge(base.clone(), base.clone()), base);
    }

    #[googletest::test]
    fn serializes_with_sorted_keys() {
        let value = tree(json!({ "zeta": 1, "alpha": { "b": 2, "a": 1 } }));

        let text = serde_json::to_string(&value).unwrap();

        expect_that!(text, eq(r#"{"alpha":{"a":1,"b":2},"zeta":1}"#));
    }
}
