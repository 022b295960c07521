//! Fatal errors for tree building and output

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a build or the surrounding command.
///
/// Per-entry access problems never show up here; they are reported through
/// a [`DiagnosticSink`](crate::tree::DiagnosticSink) and the walk continues.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Path \"{}\" does not exist.", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Cannot access \"{}\": {source}", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path \"{}\" is not a directory.", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid format \"{0}\". Supported formats: text, json, markdown")]
    InvalidFormat(String),

    #[error("Invalid ignore pattern: {0}")]
    InvalidIgnorePattern(#[from] regex::Error),

    #[error("Failed to render output: {0}")]
    Render(#[from] io::Error),

    #[error("Cannot write \"{}\": {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
