//! dirtree - directory trees as text, JSON or markdown
//!
//! Build a tree with [`TreeBuilder`] (or [`build_tree`]) and render it with a
//! [`Formatter`] from [`create_formatter`].

pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::BuildError;
pub use output::{
    Formatter, JsonFormatter, MarkdownFormatter, OutputConfig, OutputFormat, TextFormatter,
    create_formatter, format_size,
};
pub use tree::{
    DiagnosticSink, FileNode, LogSink, PatternMatcher, Preset, TreeBuilder, TreeConfig, TreeStats,
    TypeFilter, WalkWarning, build_tree, resolve_root,
};
