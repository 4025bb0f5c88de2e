//! Collects translation file paths under an input root.
//!
//! The reducer itself only consumes a list of paths; this is what the binary
//! uses to produce that list when no host build system supplies one.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    CONFIG_FILE_NAME,
    FileMatcher,
};

/// Walks `matcher.input_root()` and returns every matching file, sorted.
///
/// Hidden files are included; `.gitignore` rules are honoured. The reducer's
/// own config file is never returned, and nothing below `excluded_dirs` (the
/// build's output directory when it sits inside the input root) is visited.
/// Unreadable directory entries are logged and skipped.
#[must_use]
pub fn find_translation_files(matcher: &FileMatcher, excluded_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let input_root: &Path = matcher.input_root();
    let excluded = excluded_dirs.to_vec();
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(input_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .follow_links(false)
        .filter_entry(move |entry| !excluded.iter().any(|dir| entry.path().starts_with(dir)))
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME)
            || !matcher.is_translation_file(path)
        {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    tracing::debug!(
        input_root = %input_root.display(),
        count = found_files.len(),
        "Found translation files"
    );

    found_files
}
