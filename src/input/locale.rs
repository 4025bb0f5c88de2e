//! Locale identifier normalization.

use std::path::Path;

/// Canonicalizes a raw locale name (lower-cased).
///
/// Only case is folded; separators are kept, so `en-US` and `en_US` stay
/// distinct locales.
#[must_use]
pub fn normalize_locale(raw: &str) -> String {
    raw.to_lowercase()
}

/// Derives the locale identifier of a translation file.
///
/// The locale is the part of the file name before its first `.`, so both
/// `en-US.json` and `en-US.admin.yaml` contribute to `en-us`.
///
/// # Returns
/// `None` when the file name has no usable stem (e.g. `.json`).
#[must_use]
pub fn locale_from_path(file_path: &Path) -> Option<String> {
    let file_name = file_path.file_name()?.to_string_lossy();
    let stem = file_name.split('.').next().unwrap_or_default();

    if stem.is_empty() { None } else { Some(normalize_locale(stem)) }
}
