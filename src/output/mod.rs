//! Tree formatting
//!
//! Every formatter turns a built tree and its statistics into a single
//! string:
//! - `text` - box-drawing tree with optional ANSI colours
//! - `json` - pretty-printed `{ "tree": ..., "stats": ... }` document
//! - `markdown` - nested bullet list plus a statistics section

mod config;
mod json;
mod markdown;
mod text;
mod utils;

use std::fmt;
use std::io;
use std::str::FromStr;

use crate::error::BuildError;
use crate::tree::{FileNode, TreeStats};

// Re-export public types and functions
pub use config::OutputConfig;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
pub use utils::{format_date, format_size};

/// Renders a built tree.
pub trait Formatter {
    fn format(&self, tree: &FileNode, stats: &TreeStats) -> io::Result<String>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" => Ok(OutputFormat::Markdown),
            other => Err(BuildError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Pick the formatter for `format`.
pub fn create_formatter(format: OutputFormat, config: OutputConfig) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(config)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(config)),
    }
}
