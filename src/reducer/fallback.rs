//! Back-fills every locale from the base locale.

use thiserror::Error;

use super::LocaleTable;
use crate::tree::{
    TranslationTree,
    deep_merge,
};

/// The configured base locale cannot be used for this build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaseLocaleError {
    #[error("{locale} default locale missing translations")]
    Missing { locale: String },
}

/// Looks up the merged tree of the base locale.
///
/// # Errors
/// Returns [`BaseLocaleError::Missing`] when no readable input file
/// contributed to `base_locale`.
pub fn resolve_base_locale<'a>(
    table: &'a LocaleTable,
    base_locale: &str,
) -> Result<&'a TranslationTree, BaseLocaleError> {
    table
        .get(base_locale)
        .ok_or_else(|| BaseLocaleError::Missing { locale: base_locale.to_string() })
}

/// Returns a new table where each locale is `deep_merge(base, locale)`.
///
/// Locale values win over base values; the base only fills gaps. Filling the
/// base locale against itself leaves it unchanged. With no base, the table is
/// returned as is.
#[must_use]
pub fn fill_fallback(base: Option<&TranslationTree>, table: &LocaleTable) -> LocaleTable {
    let Some(base) = base else {
        return table.clone();
    };

    table
        .iter()
        .map(|(locale, tree)| (locale.clone(), deep_merge(base.clone(), tree.clone())))
        .collect()
}
