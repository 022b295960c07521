//! Directory tree building
//!
//! [`TreeBuilder`] walks a root directory depth-first and returns the whole
//! tree in memory together with aggregate [`TreeStats`]. Filtering is split
//! between [`NameFilter`] (hidden names, exclude globs, ignore regex) and
//! [`TypeFilter`] (file extensions).

mod config;
mod diagnostics;
mod filter;
mod node;
pub mod pattern;
mod utils;
mod walker;

// Re-export public types
pub use config::{Preset, TreeConfig};
pub use diagnostics::{DiagnosticSink, LogSink, WalkWarning};
pub use filter::{NameFilter, TypeFilter, should_include_file};
pub use node::{FileNode, TreeStats};
pub use pattern::PatternMatcher;
pub use utils::{compare_names, extension_of};
pub use walker::{TreeBuilder, build_tree, resolve_root};
