//! Build driver: runs the reducer pipeline once per invocation.
//!
//! `Idle → Reading → Merging → Filling → Reporting → Writing → Idle`
//!
//! Every stage works on values produced by the previous one, so running the
//! driver twice over the same inputs yields identical output files. Writing
//! also deletes any file in the output directory this build did not produce,
//! so outputs of locales whose inputs are gone do not linger. The host
//! build system decides when to invoke it and must not run two builds against
//! the same output directory concurrently.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::config::{
    ConfigError,
    ReducerSettings,
    ValidationError,
};
use crate::input::normalize_locale;
use crate::output::{
    CanonicalJson,
    EntryFormatter,
    JsonFileName,
    OutputNaming,
    OutputWriter,
    WriteError,
    WriteOutcome,
    WrittenFile,
};
use crate::reducer::{
    BaseLocaleError,
    DEFAULT_ADDON_MARKER,
    MissingKey,
    SkippedFile,
    fill_fallback,
    merge_sources,
    read_sources,
    report_missing_keys,
    resolve_base_locale,
};

/// Receives human-readable build diagnostics.
pub trait BuildLog {
    fn log(&self, message: &str);
}

impl<F> BuildLog for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message);
    }
}

/// Pipeline stage the driver is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Reading,
    Merging,
    Filling,
    Reporting,
    Writing,
}

/// Fatal build failure. Nothing was written.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Cannot create output directory '{}': {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A locale whose output could not be written.
#[derive(Debug)]
pub struct FailedWrite {
    pub locale: String,
    pub error: WriteError,
}

/// What one build did.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outputs: Vec<WrittenFile>,
    pub skipped_files: Vec<SkippedFile>,
    pub missing_keys: Vec<MissingKey>,
    pub base_locale_error: Option<BaseLocaleError>,
    pub failed_writes: Vec<FailedWrite>,
    /// Files from earlier builds whose locale no longer has any input.
    pub removed_outputs: Vec<PathBuf>,
    pub removal_error: Option<WriteError>,
}

impl BuildReport {
    /// Locales that have an up-to-date output file.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.outputs.iter().map(|output| output.locale.as_str()).collect()
    }

    #[must_use]
    pub fn written_count(&self) -> usize {
        self.outputs.iter().filter(|output| output.outcome == WriteOutcome::Written).count()
    }

    /// No file was skipped, no write or cleanup failed and the base locale
    /// resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_files.is_empty()
            && self.failed_writes.is_empty()
            && self.base_locale_error.is_none()
            && self.removal_error.is_none()
    }
}

/// Options for a [`BuildDriver`], checked once by [`BuildDriver::new`].
pub struct BuildOptions {
    pub output_dir: PathBuf,
    pub base_locale: Option<String>,
    pub verbose: bool,
    pub addon_marker: String,
    pub naming: Box<dyn OutputNaming>,
    pub formatter: Box<dyn EntryFormatter>,
    pub log: Option<Box<dyn BuildLog>>,
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("output_dir", &self.output_dir)
            .field("base_locale", &self.base_locale)
            .field("verbose", &self.verbose)
            .field("addon_marker", &self.addon_marker)
            .field("log", &self.log.is_some())
            .finish_non_exhaustive()
    }
}

impl BuildOptions {
    /// Defaults: no base locale, quiet, `__addon__` marker, `<locale>.json`
    /// canonical JSON output and no log.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_locale: None,
            verbose: false,
            addon_marker: DEFAULT_ADDON_MARKER.to_string(),
            naming: Box::new(JsonFileName),
            formatter: Box::new(CanonicalJson::default()),
            log: None,
        }
    }

    /// Options derived from settings; output lands in
    /// `output_root/<settings.output_path>`.
    #[must_use]
    pub fn from_settings(settings: &ReducerSettings, output_root: &Path) -> Self {
        let mut options = Self::new(output_root.join(&settings.output_path));
        options.base_locale.clone_from(&settings.base_locale);
        options.verbose = settings.verbose;
        options.addon_marker.clone_from(&settings.addon_marker);
        options.formatter = Box::new(CanonicalJson { pretty: settings.pretty });
        options
    }

    #[must_use]
    pub fn with_base_locale(mut self, locale: impl Into<String>) -> Self {
        self.base_locale = Some(locale.into());
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_addon_marker(mut self, marker: impl Into<String>) -> Self {
        self.addon_marker = marker.into();
        self
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
    pub fn with_log(mut self, log: impl BuildLog + 'static) -> Self {
        self.log = Some(Box::new(log));
        self
    }

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.output_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new("outputDir", "The output directory cannot be empty"));
        }

        if self.addon_marker.is_empty() || self.addon_marker.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "addonMarker",
                "The marker must be a single, non-empty path segment",
            ));
        }

        if self.base_locale.as_ref().is_some_and(String::is_empty) {
            errors.push(ValidationError::new("baseLocale", "The base locale cannot be empty"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Runs the translation reducer pipeline.
pub struct BuildDriver {
    writer: OutputWriter,
    base_locale: Option<String>,
    verbose: bool,
    addon_marker: String,
    log: Option<Box<dyn BuildLog>>,
    state: BuildState,
}

impl fmt::Debug for BuildDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildDriver")
            .field("writer", &self.writer)
            .field("base_locale", &self.base_locale)
            .field("verbose", &self.verbose)
            .field("addon_marker", &self.addon_marker)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl BuildDriver {
    /// Validates `options` and creates an idle driver.
    ///
    /// The base locale is normalized the same way file-name locales are.
    pub fn new(options: BuildOptions) -> Result<Self, ConfigError> {
        options.validate().map_err(ConfigError::ValidationErrors)?;

        let BuildOptions { output_dir, base_locale, verbose, addon_marker, naming, formatter, log } =
            options;

        Ok(Self {
            writer: OutputWriter::from_parts(output_dir, naming, formatter),
            base_locale: base_locale.as_deref().map(normalize_locale),
            verbose,
            addon_marker,
            log,
            state: BuildState::Idle,
        })
    }

    #[must_use]
    pub const fn state(&self) -> BuildState {
        self.state
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        self.writer.output_dir()
    }

    /// Reduces `files` (absolute paths under `input_root`) into one output
    /// file per locale.
    ///
    /// Per-file read failures, a missing base locale and per-locale write
    /// failures are recorded in the report and logged; they never stop the
    /// build.
    ///
    /// # Errors
    /// Returns [`BuildError::OutputDirectory`] when the output directory
    /// cannot be created. No output is written in that case.
    pub fn build(
        &mut self,
        input_root: &Path,
        files: &[PathBuf],
    ) -> Result<BuildReport, BuildError> {
        tracing::debug!(
            input_root = %input_root.display(),
            files = files.len(),
            "Starting translation build"
        );

        let result = self.run(input_root, files);
        self.transition(BuildState::Idle);

        match &result {
            Ok(report) => tracing::info!(
                locales = report.outputs.len(),
                written = report.written_count(),
                skipped = report.skipped_files.len(),
                failed = report.failed_writes.len(),
                "Translation build finished"
            ),
            Err(e) => {
                tracing::error!("Translation build failed: {e}");
                self.emit(&e.to_string());
            }
        }

        result
    }

    fn run(&mut self, input_root: &Path, files: &[PathBuf]) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        self.transition(BuildState::Reading);
        let (sources, skipped) = read_sources(input_root, files, &self.addon_marker);
        for skipped_file in &skipped {
            self.emit(&skipped_file.diagnostic());
        }
        report.skipped_files = skipped;

        self.transition(BuildState::Merging);
        let table = merge_sources(sources);

        self.transition(BuildState::Filling);
        let base_locale = self.base_locale.clone();
        let base = match &base_locale {
            Some(locale) => match resolve_base_locale(&table, locale) {
                Ok(tree) => Some((locale.as_str(), tree)),
                Err(e) => {
                    tracing::warn!("{e}");
                    self.emit(&e.to_string());
                    report.base_locale_error = Some(e);
                    None
                }
            },
            None => None,
        };
        let filled = fill_fallback(base.map(|(_, tree)| tree), &table);

        self.transition(BuildState::Reporting);
        if self.verbose
            && let Some((locale, base_tree)) = base
        {
            report.missing_keys = report_missing_keys(locale, base_tree, &table);
            for missing in &report.missing_keys {
                self.emit(&missing.to_string());
            }
        }

        self.transition(BuildState::Writing);
        self.writer.ensure_output_dir().map_err(|source| BuildError::OutputDirectory {
            path: self.writer.output_dir().to_path_buf(),
            source,
        })?;

        for (locale, tree) in &filled {
            match self.writer.write(locale, tree) {
                Ok(written) => report.outputs.push(written),
                Err(error) => {
                    tracing::warn!(locale = %locale, "Failed to write translations: {error}");
                    self.emit(&format!("cannot write \"{locale}\": {error}"));
                    report.failed_writes.push(FailedWrite { locale: locale.clone(), error });
                }
            }
        }

        let produced: BTreeSet<PathBuf> =
            filled.keys().filter_map(|locale| self.writer.output_path(locale).ok()).collect();
        match self.writer.remove_stale(&produced) {
            Ok(removed) => {
                for path in &removed {
                    tracing::info!(path = %path.display(), "Removed stale output");
                }
                report.removed_outputs = removed;
            }
            Err(error) => {
                tracing::warn!("Failed to remove stale outputs: {error}");
                self.emit(&format!("cannot remove stale outputs: {error}"));
                report.removal_error = Some(error);
            }
        }

        Ok(report)
    }

    fn transition(&mut self, next: BuildState) {
        tracing::debug!(from = ?self.state, to = ?next, "Build state transition");
        self.state = next;
    }

    fn emit(&self, message: &str) {
        if let Some(log) = &self.log {
            log.log(message);
        }
    }
}
