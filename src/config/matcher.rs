//! File pattern matcher for translation files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::ReducerSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against the configured translation file patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    input_root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(input_root: PathBuf, settings: &ReducerSettings) -> Result<Self, MatcherError> {
        let include_set =
            Self::build_glob_set(&settings.translation_files.include_patterns, |pattern, source| {
                MatcherError::InvalidTranslationPattern { pattern, source }
            })?;

        let exclude_set =
            Self::build_glob_set(&settings.translation_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { input_root, include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    /// Returns true if the path matches `translationFiles.includePatterns`
    /// but not `translationFiles.excludePatterns`.
    ///
    /// The path must be absolute and under the input root.
    #[must_use]
    pub fn is_translation_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.input_root).ok() else {
            return false;
        };

        self.is_translation_file_relative(relative_path)
    }

    /// Same as [`Self::is_translation_file`] for a path relative to the input root.
    #[must_use]
    pub fn is_translation_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::config::TranslationFilesConfig;

    fn create_settings(include: &[&str], exclude: &[&str]) -> ReducerSettings {
        ReducerSettings {
            translation_files: TranslationFilesConfig {
                include_patterns: include.iter().copied().map(String::from).collect(),
                exclude_patterns: exclude.iter().copied().map(String::from).collect(),
            },
            ..ReducerSettings::default()
        }
    }

    #[rstest]
    fn is_translation_file_with_default_patterns() {
        let settings = ReducerSettings::default();
        let matcher =
            FileMatcher::new(PathBuf::from("/translations"), &settings).expect("valid patterns");

        assert!(matcher.is_translation_file(Path::new("/translations/en-us.json")));
        assert!(matcher.is_translation_file(Path::new("/translations/__addon__/x/fr.yaml")));
        assert!(matcher.is_translation_file(Path::new("/translations/de.yml")));

        assert!(!matcher.is_translation_file(Path::new("/translations/README.md")));
        assert!(!matcher.is_translation_file(Path::new("/translations/en.toml")));
    }

    #[rstest]
    fn is_translation_file_with_exclude() {
        let settings = create_settings(&["**/*.json"], &["**/drafts/**"]);
        let matcher =
            FileMatcher::new(PathBuf::from("/translations"), &settings).expect("valid patterns");

        assert!(matcher.is_translation_file(Path::new("/translations/en.json")));
        assert!(!matcher.is_translation_file(Path::new("/translations/drafts/en.json")));
    }

    #[rstest]
    fn is_translation_file_outside_input_root() {
        let settings = ReducerSettings::default();
        let matcher =
            FileMatcher::new(PathBuf::from("/translations"), &settings).expect("valid patterns");

        assert!(!matcher.is_translation_file(Path::new("/other/en.json")));
    }

    #[rstest]
    fn is_translation_file_relative_works() {
        let settings = create_settings(&["*.json"], &[]);
        let matcher =
            FileMatcher::new(PathBuf::from("/translations"), &settings).expect("valid patterns");

        assert!(matcher.is_translation_file_relative(Path::new("en.json")));
        assert!(!matcher.is_translation_file_relative(Path::new("en.yaml")));
    }

    #[rstest]
    fn new_with_invalid_translation_pattern() {
        let settings = create_settings(&["**/*.{json"], &[]);

        let result = FileMatcher::new(PathBuf::from("/translations"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidTranslationPattern { .. })));
    }

    #[rstest]
    fn new_with_invalid_exclude_pattern() {
        let settings = create_settings(&["**/*.json"], &["[invalid"]);

        let result = FileMatcher::new(PathBuf::from("/translations"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidExcludePattern { .. })));
    }

    #[rstest]
    fn input_root_accessor() {
        let settings = ReducerSettings::default();
        let matcher =
            FileMatcher::new(PathBuf::from("/translations"), &settings).expect("valid patterns");

        assert_eq!(matcher.input_root(), Path::new("/translations"));
    }
}
