//! Translation file inputs
/// Locale identifiers derived from file names
pub mod locale;
/// Structured-data readers for translation files
pub mod reader;

pub use locale::{
    locale_from_path,
    normalize_locale,
};
pub use reader::{
    ParseError,
    TranslationFormat,
    parse_translation,
    read_translation_file,
};
