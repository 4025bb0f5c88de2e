//! translation-reducer
//!
//! Build-time reducer that merges application and library translation files
//! into one JSON file per locale.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod driver;
pub mod input;
pub mod keys;
pub mod output;
pub mod reducer;
pub mod tree;

pub use driver::{
    BuildDriver,
    BuildError,
    BuildLog,
    BuildOptions,
    BuildReport,
    BuildState,
    FailedWrite,
};
pub use tree::{
    TranslationTree,
    deep_merge,
};
