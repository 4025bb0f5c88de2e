/// Maps a locale identifier to the base name of its output file.
pub trait OutputNaming {
    fn file_name(&self, locale: &str) -> String;
}

/// Default naming: `<locale>.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileName;

impl OutputNaming for JsonFileName {
    fn file_name(&self, locale: &str) -> String {
        format!("{locale}.json")
    }
}

impl<F> OutputNaming for F
where
    F: Fn(&str) -> String,
{
    fn file_name(&self, locale: &str) -> String {
        self(locale)
    }
}
