//! Source origin detection and deterministic merge order.

use std::path::{
    Component,
    Path,
    PathBuf,
};

/// Path segment that marks library/addon-provided translations.
pub const DEFAULT_ADDON_MARKER: &str = "__addon__";

/// Who contributed a translation file.
///
/// Ordering matters: `Library` sorts before `Application`, so application
/// files are merged last and win key collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceOrigin {
    Library,
    Application,
}

/// An input path tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedPath {
    pub path: PathBuf,
    pub origin: SourceOrigin,
}

/// Classifies a path by its first segment relative to `input_root`.
///
/// Paths outside `input_root` are treated as application-provided.
#[must_use]
pub fn origin_of(input_root: &Path, path: &Path, marker: &str) -> SourceOrigin {
    let relative = path.strip_prefix(input_root).unwrap_or(path);

    match relative.components().next() {
        Some(Component::Normal(first)) if first == marker => SourceOrigin::Library,
        _ => SourceOrigin::Application,
    }
}

/// Orders paths for merging: library paths first, then application paths.
///
/// Within one origin, paths are ordered lexicographically, so the result does
/// not depend on the order the host listed them in. Duplicates are dropped.
#[must_use]
pub fn order_paths(input_root: &Path, paths: &[PathBuf], marker: &str) -> Vec<OrderedPath> {
    let mut ordered: Vec<OrderedPath> = paths
        .iter()
        .map(|path| OrderedPath { path: path.clone(), origin: origin_of(input_root, path, marker) })
        .collect();

    ordered.sort_by(|a, b| a.origin.cmp(&b.origin).then_with(|| a.path.cmp(&b.path)));
    ordered.dedup_by(|a, b| a.path == b.path);

    ordered
}
