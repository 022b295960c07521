//! Non-fatal warnings raised while walking

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A problem with one entry or directory. The walk carries on after each.
#[derive(Debug, Error)]
pub enum WalkWarning {
    #[error("Cannot read directory {}: {source}", path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot access {}: {source}", path.display())]
    UnreadableEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not descending into {}: already visited as an ancestor", path.display())]
    SymlinkCycle { path: PathBuf },
}

impl WalkWarning {
    pub fn path(&self) -> &PathBuf {
        match self {
            WalkWarning::UnreadableDirectory { path, .. }
            | WalkWarning::UnreadableEntry { path, .. }
            | WalkWarning::SymlinkCycle { path } => path,
        }
    }
}

/// Receiver for walk warnings.
pub trait DiagnosticSink {
    fn warn(&mut self, warning: WalkWarning);
}

/// Collects warnings for later inspection.
impl DiagnosticSink for Vec<WalkWarning> {
    fn warn(&mut self, warning: WalkWarning) {
        self.push(warning);
    }
}

impl<F: FnMut(WalkWarning)> DiagnosticSink for F {
    fn warn(&mut self, warning: WalkWarning) {
        self(warning)
    }
}

/// Forwards warnings to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&mut self, warning: WalkWarning) {
        log::warn!("{}", warning);
    }
}
