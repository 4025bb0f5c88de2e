use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::reducer::DEFAULT_ADDON_MARKER;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReducerSettings {
    /// Destination subdirectory, relative to the build output root.
    pub output_path: String,

    /// Locale whose keys back-fill every other locale.
    pub base_locale: Option<String>,

    /// Report keys missing relative to `base_locale`.
    pub verbose: bool,

    /// First path segment that marks library/addon-provided files.
    pub addon_marker: String,

    /// Pretty-print output JSON (still key-sorted).
    pub pretty: bool,

    pub translation_files: TranslationFilesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl ReducerSettings {
    /// # Errors
    /// - Required field is empty
    /// - `outputPath` is absolute
    /// - `addonMarker` is not a single path segment
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.output_path.is_empty() {
            errors.push(ValidationError::new(
                "outputPath",
                "The output path cannot be empty. Example: \"translations\"",
            ));
        } else if Path::new(&self.output_path).is_absolute() {
            errors.push(ValidationError::new(
                "outputPath",
                format!("The output path must be relative, got '{}'", self.output_path),
            ));
        }

        if let Some(base_locale) = &self.base_locale
            && base_locale.is_empty()
        {
            errors.push(ValidationError::new(
                "baseLocale",
                "The base locale cannot be empty. Specify a locale (e.g., \"en-us\"), or remove this field",
            ));
        }

        if self.addon_marker.is_empty() {
            errors.push(ValidationError::new(
                "addonMarker",
                "The marker cannot be empty. Example: \"__addon__\"",
            ));
        } else if self.addon_marker.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "addonMarker",
                format!("The marker must be a single path segment, got '{}'", self.addon_marker),
            ));
        }

        if self.translation_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/*.json\"]",
            ));
        }

        for (index, pattern) in self.translation_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.translation_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec![
                "**/*.json".to_string(),
                "**/*.yaml".to_string(),
                "**/*.yml".to_string(),
            ],
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for ReducerSettings {
    fn default() -> Self {
        Self {
            output_path: "translations".to_string(),
            base_locale: None,
            verbose: false,
            addon_marker: DEFAULT_ADDON_MARKER.to_string(),
            pretty: false,
            translation_files: TranslationFilesConfig::default(),
        }
    }
}
