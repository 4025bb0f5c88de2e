//! Reports keys that a locale lacks compared to the base locale.

use std::collections::BTreeSet;
use std::fmt;

use super::LocaleTable;
use crate::keys::flatten_keys;
use crate::tree::TranslationTree;

/// One key present in the base locale but absent from `locale`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingKey {
    pub locale: String,
    /// Escaped flattened key path (see [`crate::keys`]).
    pub key_path: String,
}

impl fmt::Display for MissingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} missing from {}", self.key_path, self.locale)
    }
}

/// Keys of `base_keys` that `tree` does not define, in sorted order.
///
/// `tree` must be the locale's tree as merged from its own files, before any
/// fallback filling.
#[must_use]
pub fn find_missing_keys(
    base_keys: &BTreeSet<String>,
    locale: &str,
    tree: &TranslationTree,
) -> Vec<MissingKey> {
    let present = flatten_keys(tree);

    base_keys
        .difference(&present)
        .map(|key_path| MissingKey { locale: locale.to_string(), key_path: key_path.clone() })
        .collect()
}

/// Compares every non-base locale of `table` against `base`.
///
/// Locales are visited in sorted order so the report is reproducible.
#[must_use]
pub fn report_missing_keys(
    base_locale: &str,
    base: &TranslationTree,
    table: &LocaleTable,
) -> Vec<MissingKey> {
    let base_keys = flatten_keys(base);

    table
        .iter()
        .filter(|(locale, _)| locale.as_str() != base_locale)
        .flat_map(|(locale, tree)| find_missing_keys(&base_keys, locale, tree))
        .collect()
}
