//! Folds every input file into one translation tree per locale.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::LocaleTable;
use super::order::{
    SourceOrigin,
    order_paths,
};
use crate::input::{
    ParseError,
    locale_from_path,
    read_translation_file,
};
use crate::tree::{
    TranslationTree,
    deep_merge,
};

/// A successfully read translation file.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationSource {
    pub path: PathBuf,
    pub origin: SourceOrigin,
    pub locale: String,
    pub tree: TranslationTree,
}

#[derive(Error, Debug)]
pub enum SkipReason {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("file name does not start with a locale identifier")]
    NoLocale,
}

/// An input file that contributed nothing to the merge.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl SkippedFile {
    /// Diagnostic line handed to the build log.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        format!("cannot read path \"{}\": {}", self.path.display(), self.reason)
    }
}

/// Result of reducing all inputs.
#[derive(Debug, Default)]
pub struct ReducedTranslations {
    pub locales: LocaleTable,
    pub skipped: Vec<SkippedFile>,
}

/// Reads every input file in merge order.
///
/// Directories are ignored. Files that fail to read are returned as
/// [`SkippedFile`]s and never abort the remaining files.
#[must_use]
pub fn read_sources(
    input_root: &Path,
    files: &[PathBuf],
    addon_marker: &str,
) -> (Vec<TranslationSource>, Vec<SkippedFile>) {
    let mut sources = Vec::new();
    let mut skipped = Vec::new();

    for entry in order_paths(input_root, files, addon_marker) {
        if entry.path.is_dir() {
            tracing::trace!(path = %entry.path.display(), "Skipping directory");
            continue;
        }

        let tree = match read_translation_file(&entry.path) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(path = %entry.path.display(), "Skipping translation file: {e}");
                skipped.push(SkippedFile { path: entry.path, reason: e.into() });
                continue;
            }
        };

        let Some(locale) = locale_from_path(&entry.path) else {
            tracing::warn!(path = %entry.path.display(), "Skipping translation file without locale");
            skipped.push(SkippedFile { path: entry.path, reason: SkipReason::NoLocale });
            continue;
        };

        tracing::debug!(
            path = %entry.path.display(),
            locale = %locale,
            origin = ?entry.origin,
            "Read translation file"
        );
        sources.push(TranslationSource { path: entry.path, origin: entry.origin, locale, tree });
    }

    (sources, skipped)
}

/// Left-folds sources into a [`LocaleTable`].
///
/// Later sources overwrite colliding keys of earlier ones for the same
/// locale, so callers must pass sources in merge order.
#[must_use]
pub fn merge_sources(sources: Vec<TranslationSource>) -> LocaleTable {
    sources.into_iter().fold(LocaleTable::new(), |mut table, source| {
        let merged = match table.remove(&source.locale) {
            Some(existing) => deep_merge(existing, source.tree),
            None => source.tree,
        };
        table.insert(source.locale, merged);
        table
    })
}

/// Reads and merges all inputs under `input_root`.
#[must_use]
pub fn reduce_directory(
    input_root: &Path,
    files: &[PathBuf],
    addon_marker: &str,
) -> ReducedTranslations {
    let (sources, skipped) = read_sources(input_root, files, addon_marker);

    ReducedTranslations { locales: merge_sources(sources), skipped }
}
