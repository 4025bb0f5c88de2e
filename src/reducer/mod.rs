//! Translation reducer stages.
//!
//! Each stage consumes the previous stage's value and returns a new one:
//! order paths, read sources, merge per locale, fill from the base locale,
//! and report keys missing relative to the base locale.

/// Merge of read sources into one tree per locale
pub mod directory;
/// Base-locale fallback
pub mod fallback;
/// Missing-key diagnostics
pub mod missing;
/// Source origin and merge order
pub mod order;

use std::collections::BTreeMap;

use crate::tree::TranslationTree;

/// Locale identifier → merged translation tree.
pub type LocaleTable = BTreeMap<String, TranslationTree>;

pub use directory::{
    ReducedTranslations,
    SkipReason,
    SkippedFile,
    TranslationSource,
    merge_sources,
    read_sources,
    reduce_directory,
};
pub use fallback::{
    BaseLocaleError,
    fill_fallback,
    resolve_base_locale,
};
pub use missing::{
    MissingKey,
    find_missing_keys,
    report_missing_keys,
};
pub use order::{
    DEFAULT_ADDON_MARKER,
    OrderedPath,
    SourceOrigin,
    order_paths,
    origin_of,
};
