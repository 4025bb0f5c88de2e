//! Configuration file loading

use std::path::Path;

use super::{
    ConfigError,
    ReducerSettings,
};

/// Config file looked up in the input root.
pub const CONFIG_FILE_NAME: &str = ".translation-reducer.json";

/// Loads settings from `input_root/.translation-reducer.json`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no config file in `input_root`
/// - `Err(ConfigError)`: the file could not be read or parsed
pub fn load_from_dir(input_root: &Path) -> Result<Option<ReducerSettings>, ConfigError> {
    let config_path = input_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// Loads settings from an explicit config file path.
pub fn load_from_file(config_path: &Path) -> Result<ReducerSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: ReducerSettings = serde_json::from_str(&content)?;

    Ok(settings)
}

/// Resolves and validates settings for a build.
///
/// An explicit `config_path` wins; otherwise the input root is searched and
/// defaults are used when nothing is found.
pub fn load_settings(
    input_root: &Path,
    config_path: Option<&Path>,
) -> Result<ReducerSettings, ConfigError> {
    let settings = match config_path {
        Some(path) => load_from_file(path)?,
        None => load_from_dir(input_root)?.unwrap_or_default(),
    };

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_load_from_dir_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"outputPath": "intl", "baseLocale": "en-us"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_dir(temp_dir.path());

        let settings = result.unwrap().unwrap();
        assert_eq!(settings.output_path, "intl");
        assert_eq!(settings.base_locale.as_deref(), Some("en-us"));
    }

    #[rstest]
    fn test_load_from_dir_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[rstest]
    fn test_load_from_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    fn test_load_settings_prefers_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"outputPath": "dir"}"#).unwrap();
        let explicit = temp_dir.path().join("custom.json");
        fs::write(&explicit, r#"{"outputPath": "explicit"}"#).unwrap();

        let settings = load_settings(temp_dir.path(), Some(explicit.as_path())).unwrap();

        assert_eq!(settings.output_path, "explicit");
    }

    #[rstest]
    fn test_load_settings_defaults_without_config() {
        let temp_dir = TempDir::new().unwrap();

        let settings = load_settings(temp_dir.path(), None).unwrap();

        assert_eq!(settings, ReducerSettings::default());
    }

    #[rstest]
    fn test_load_settings_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"addonMarker": ""}"#).unwrap();

        let result = load_settings(temp_dir.path(), None);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(errors)) if errors.len() == 1));
    }

    #[rstest]
    fn test_load_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(&temp_dir.path().join("absent.json"));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
