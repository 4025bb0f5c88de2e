use thiserror::Error;

use crate::tree::TranslationTree;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to serialize translations: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes a locale's final tree into the output file content.
pub trait EntryFormatter {
    /// # Errors
    /// Returns [`FormatError`] if the tree cannot be serialized.
    fn format(&self, tree: &TranslationTree) -> Result<String, FormatError>;
}

/// Key-sorted JSON; identical logical content always yields identical bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalJson {
    pub pretty: bool,
}

impl CanonicalJson {
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl EntryFormatter for CanonicalJson {
    fn format(&self, tree: &TranslationTree) -> Result<String, FormatError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(tree)?
        } else {
            serde_json::to_string(tree)?
        };
        Ok(text)
    }
}

impl<F> EntryFormatter for F
where
    F: Fn(&TranslationTree) -> String,
{
    fn format(&self, tree: &TranslationTree) -> Result<String, FormatError> {
        Ok(self(tree))
    }
}
