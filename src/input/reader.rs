//! Reads a single translation file into a [`TranslationTree`].

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::tree::TranslationTree;

/// Why a translation file could not be turned into a tree.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported translation file extension: '{}'", .path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("Failed to parse JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML in '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document root is not a key/value mapping (includes empty YAML documents).
    #[error("Translation file '{}' does not contain a key/value mapping", .path.display())]
    NotAMapping { path: PathBuf },

    #[error("Unsupported key {key} in '{}'", .path.display())]
    UnsupportedKey { path: PathBuf, key: String },
}

/// Structured-data format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationFormat {
    Json,
    /// `.yaml` and `.yml`
    Yaml,
}

impl TranslationFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Reads and parses a translation file.
///
/// # Errors
/// Returns [`ParseError`] if the extension is unknown, the file cannot be
/// read, or its content is malformed.
pub fn read_translation_file(path: &Path) -> Result<TranslationTree, ParseError> {
    let format = TranslationFormat::from_path(path)
        .ok_or_else(|| ParseError::UnsupportedExtension { path: path.to_path_buf() })?;

    let content = std::fs::read_to_string(path)
        .map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;

    parse_translation(&content, format, path)
}

/// Parses translation text. `path` is only used for error reporting.
///
/// # Errors
/// Returns [`ParseError`] if the content is malformed or its root is not a
/// mapping.
pub fn parse_translation(
    content: &str,
    format: TranslationFormat,
    path: &Path,
) -> Result<TranslationTree, ParseError> {
    let value = match format {
        TranslationFormat::Json => serde_json::from_str::<Value>(content)
            .map_err(|source| ParseError::Json { path: path.to_path_buf(), source })?,
        TranslationFormat::Yaml if content.trim().is_empty() => {
            return Err(ParseError::NotAMapping { path: path.to_path_buf() });
        }
        TranslationFormat::Yaml => {
            let yaml_error =
                |source: serde_yaml::Error| ParseError::Yaml { path: path.to_path_buf(), source };
            let mut yaml =
                serde_yaml::from_str::<serde_yaml::Value>(content).map_err(yaml_error)?;
            // `<<: *anchor` merge keys
            yaml.apply_merge().map_err(yaml_error)?;
            yaml_to_json(yaml, path)?
        }
    };

    if !value.is_object() {
        return Err(ParseError::NotAMapping { path: path.to_path_buf() });
    }

    Ok(TranslationTree::from(value))
}

fn yaml_to_json(value: serde_yaml::Value, path: &Path) -> Result<Value, ParseError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items.into_iter().map(|item| yaml_to_json(item, path)).collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(key, path)?, yaml_to_json(value, path)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => {
            let tagged = *tagged;
            yaml_to_json(tagged.value, path)?
        }
    })
}

/// Non-finite floats have no JSON representation and become `null`.
fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64().and_then(serde_json::Number::from_f64).map_or(Value::Null, Value::Number)
    }
}

/// Scalar YAML keys are stringified the way a YAML-to-JSON loader would.
fn yaml_key(key: serde_yaml::Value, path: &Path) -> Result<String, ParseError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        other => Err(ParseError::UnsupportedKey {
            path: path.to_path_buf(),
            key: format!("{other:?}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case("en.json", Some(TranslationFormat::Json))]
    #[case("en.yaml", Some(TranslationFormat::Yaml))]
    #[case("en.yml", Some(TranslationFormat::Yaml))]
    #[case("en.toml", None)]
    #[case("en", None)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Option<TranslationFormat>) {
        assert_eq!(TranslationFormat::from_path(Path::new(path)), expected);
    }

    #[rstest]
    fn parse_json_mapping() {
        let tree = parse_translation(
            r#"{"greeting": "hi", "nested": {"n": 1}}"#,
            TranslationFormat::Json,
            Path::new("en.json"),
        )
        .unwrap();

        assert_eq!(tree.into_value(), json!({ "greeting": "hi", "nested": { "n": 1 } }));
    }

    #[rstest]
    fn parse_yaml_mapping() {
        let yaml = "greeting: hi\nnested:\n  count: 2\n  list: [a, b]\n  off: false\n";

        let tree = parse_translation(yaml, TranslationFormat::Yaml, Path::new("en.yaml")).unwrap();

        assert_eq!(
            tree.into_value(),
            json!({ "greeting": "hi", "nested": { "count": 2, "list": ["a", "b"], "off": false } })
        );
    }

    #[rstest]
    fn parse_yaml_stringifies_scalar_keys() {
        let yaml = "1: one\ntrue: yes-value\n";

        let tree = parse_translation(yaml, TranslationFormat::Yaml, Path::new("en.yml")).unwrap();

        assert_eq!(tree.into_value(), json!({ "1": "one", "true": "yes-value" }));
    }

    #[rstest]
    fn parse_yaml_resolves_merge_keys() {
        let yaml = "\
base: &base
  ok: OK
  cancel: Cancel
dialog:
  <<: *base
  cancel: Abort
";

        let tree = parse_translation(yaml, TranslationFormat::Yaml, Path::new("en.yml")).unwrap();

        assert_eq!(
            tree.into_value(),
            json!({
                "base": { "ok": "OK", "cancel": "Cancel" },
                "dialog": { "ok": "OK", "cancel": "Abort" }
            })
        );
    }

    #[rstest]
    fn parse_yaml_rejects_mapping_keys() {
        let yaml = "? [a, b]\n: value\n";

        let result = parse_translation(yaml, TranslationFormat::Yaml, Path::new("en.yml"));

        assert!(matches!(result, Err(ParseError::UnsupportedKey { .. })));
    }

    #[rstest]
    #[case::json_array("[1, 2]", TranslationFormat::Json)]
    #[case::json_string(r#""text""#, TranslationFormat::Json)]
    #[case::yaml_empty("", TranslationFormat::Yaml)]
    #[case::yaml_scalar("just text", TranslationFormat::Yaml)]
    fn parse_rejects_non_mapping_roots(#[case] content: &str, #[case] format: TranslationFormat) {
        let result = parse_translation(content, format, Path::new("x"));

        assert!(matches!(result, Err(ParseError::NotAMapping { .. })));
    }

    #[googletest::test]
    fn parse_malformed_json_reports_path() {
        let result = parse_translation("{ oops", TranslationFormat::Json, Path::new("/t/de.json"));

        assert!(matches!(result, Err(ParseError::Json { .. })));
        let message = result.unwrap_err().to_string();
        expect_that!(message, contains_substring("/t/de.json"));
    }

    #[rstest]
    fn read_translation_file_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.json");
        fs::write(&path, r#"{"x": 9}"#).unwrap();

        let tree = read_translation_file(&path).unwrap();

        assert_eq!(tree.into_value(), json!({ "x": 9 }));
    }

    #[rstest]
    fn read_translation_file_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.txt");
        fs::write(&path, "x = 1").unwrap();

        let result = read_translation_file(&path);

        assert!(matches!(result, Err(ParseError::UnsupportedExtension { .. })));
    }

    #[rstest]
    fn read_translation_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_translation_file(&temp_dir.path().join("gone.json"));

        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
