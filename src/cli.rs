//! Command-line front end for a one-shot build.

use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use thiserror::Error;

use crate::config::{
    ConfigError,
    FileMatcher,
    MatcherError,
    ReducerSettings,
    load_settings,
};
use crate::discovery::find_translation_files;
use crate::driver::{
    BuildDriver,
    BuildError,
    BuildOptions,
    BuildReport,
};

/// Merge translation files into one JSON file per locale.
#[derive(Parser, Debug, Clone)]
#[command(name = "translation-reducer")]
#[command(version, about)]
pub struct Cli {
    /// Directory holding application and `__addon__` translation files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Build output root; files land in `<DIR>/<outputPath>`.
    #[arg(short, long, value_name = "DIR", default_value = "dist")]
    pub out_dir: PathBuf,

    /// Config file [default: `<INPUT_DIR>/.translation-reducer.json`].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Locale used to fill keys missing from other locales.
    #[arg(short, long, value_name = "LOCALE")]
    pub base_locale: Option<String>,

    /// Report keys missing relative to the base locale.
    #[arg(short, long)]
    pub verbose: bool,

    /// Pretty-print output JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot resolve input directory '{}': {source}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stale-output cleanup would delete input files.
    #[error("Output directory '{}' must not contain the input directory", .path.display())]
    OutputContainsInput { path: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl Cli {
    /// Applies command-line overrides on top of file settings.
    fn apply_overrides(&self, mut settings: ReducerSettings) -> ReducerSettings {
        if let Some(base_locale) = &self.base_locale {
            settings.base_locale = Some(base_locale.clone());
        }
        settings.verbose |= self.verbose;
        settings.pretty |= self.pretty;
        settings
    }
}

/// Discovers inputs under `cli.input_dir` and runs one build.
///
/// Diagnostics go to stderr through `log`.
pub fn run(cli: &Cli, log: impl Fn(&str) + 'static) -> Result<BuildReport, CliError> {
    let input_root = cli
        .input_dir
        .canonicalize()
        .map_err(|source| CliError::InputDir { path: cli.input_dir.clone(), source })?;

    let settings = load_settings(&input_root, cli.config.as_deref())?;
    let settings = cli.apply_overrides(settings);
    tracing::debug!(?settings, "Resolved reducer settings");

    let options = BuildOptions::from_settings(&settings, &cli.out_dir).with_log(log);
    let output_dir = resolve_dir(&options.output_dir);
    if input_root.starts_with(&output_dir) {
        return Err(CliError::OutputContainsInput { path: output_dir });
    }
    let excluded: Vec<PathBuf> =
        output_dir.starts_with(&input_root).then_some(output_dir).into_iter().collect();

    let matcher = FileMatcher::new(input_root.clone(), &settings)?;
    let files = find_translation_files(&matcher, &excluded);

    let mut driver = BuildDriver::new(options)?;

    Ok(driver.build(&input_root, &files)?)
}

/// Absolute form of `dir`; an existing directory is canonicalized so it
/// compares equal to the canonical input root through symlinks.
fn resolve_dir(dir: &Path) -> PathBuf {
    dir.canonicalize()
        .or_else(|_| std::path::absolute(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
