use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::format::{
    CanonicalJson,
    EntryFormatter,
    FormatError,
};
use super::naming::{
    JsonFileName,
    OutputNaming,
};
use crate::tree::TranslationTree;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create output directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The naming strategy produced something other than a plain file name.
    #[error("Invalid output file name '{name}' for locale '{locale}'")]
    InvalidFileName { locale: String, name: String },

    #[error("Failed to serialize locale '{locale}': {source}")]
    Format {
        locale: String,
        #[source]
        source: FormatError,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove stale output '{}': {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already held exactly this content and was left untouched.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub locale: String,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Writes one serialized file per locale into `output_dir`.
///
/// Files are replaced atomically (temporary file in the same directory, then
/// rename), so a reader never observes a truncated output file.
pub struct OutputWriter {
    output_dir: PathBuf,
    naming: Box<dyn OutputNaming>,
    formatter: Box<dyn EntryFormatter>,
}

impl fmt::Debug for OutputWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputWriter")
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl OutputWriter {
    /// Writer with `<locale>.json` names and canonical JSON content.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::from_parts(
            output_dir.into(),
            Box::new(JsonFileName),
            Box::new(CanonicalJson::default()),
        )
    }

    #[must_use]
    pub fn from_parts(
        output_dir: PathBuf,
        naming: Box<dyn OutputNaming>,
        formatter: Box<dyn EntryFormatter>,
    ) -> Self {
        Self { output_dir, naming, formatter }
    }

    #[must_use]
    pub fn with_naming(mut self, naming: impl OutputNaming + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl EntryFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory and any missing parents.
    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }

    /// Resolves the output path for `locale`.
    pub fn output_path(&self, locale: &str) -> Result<PathBuf, WriteError> {
        let name = self.naming.file_name(locale);

        let mut components = Path::new(&name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.output_dir.join(name)),
            _ => Err(WriteError::InvalidFileName { locale: locale.to_string(), name }),
        }
    }

    /// Serializes `tree` and writes it to the file for `locale`.
    pub fn write(&self, locale: &str, tree: &TranslationTree) -> Result<WrittenFile, WriteError> {
        let path = self.output_path(locale)?;
        let contents = self
            .formatter
            .format(tree)
            .map_err(|source| WriteError::Format { locale: locale.to_string(), source })?;

        self.ensure_output_dir()
            .map_err(|source| WriteError::CreateDir { path: self.output_dir.clone(), source })?;

        if fs::read(&path).is_ok_and(|existing| existing == contents.as_bytes()) {
            tracing::debug!(path = %path.display(), "Output unchanged");
            return Ok(WrittenFile {
                locale: locale.to_string(),
                path,
                outcome: WriteOutcome::Unchanged,
            });
        }

        self.replace_file(&path, contents.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote output");

        Ok(WrittenFile { locale: locale.to_string(), path, outcome: WriteOutcome::Written })
    }

    /// Deletes every regular file directly inside the output directory that is
    /// not listed in `keep`, returning the removed paths in sorted order.
    ///
    /// Subdirectories are left alone. A missing output directory has nothing
    /// to remove.
    pub fn remove_stale(&self, keep: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>, WriteError> {
        let read_error =
            |source: std::io::Error| WriteError::Remove { path: self.output_dir.clone(), source };

        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_error(e)),
        };

        let mut stale = Vec::new();
        for entry in entries {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();
            if entry.file_type().map_err(read_error)?.is_file() && !keep.contains(&path) {
                stale.push(path);
            }
        }
        stale.sort();

        for path in &stale {
            fs::remove_file(path)
                .map_err(|source| WriteError::Remove { path: path.clone(), source })?;
            tracing::debug!(path = %path.display(), "Removed stale output");
        }

        Ok(stale)
    }

    fn replace_file(&self, path: &Path, contents: &[u8]) -> Result<(), WriteError> {
        let write_error = |source| WriteError::Write { path: path.to_path_buf(), source };

        let mut temp = NamedTempFile::new_in(&self.output_dir).map_err(write_error)?;
        temp.write_all(contents).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(path).map_err(|e| write_error(e.error))?;

        Ok(())
    }
}
