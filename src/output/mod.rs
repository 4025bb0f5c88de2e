//! Serializes merged locales and writes one file per locale.

/// Entry serialization strategies
mod format;
/// Output file naming strategies
mod naming;
/// Atomic per-locale file writer
mod writer;

pub use format::{
    CanonicalJson,
    EntryFormatter,
    FormatError,
};
pub use naming::{
    JsonFileName,
    OutputNaming,
};
pub use writer::{
    OutputWriter,
    WriteError,
    WriteOutcome,
    WrittenFile,
};
