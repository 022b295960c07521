//! JSON output formatting

use std::io;

use serde::Serialize;

use crate::tree::{FileNode, TreeStats};

use super::Formatter;

/// Top-level JSON document.
#[derive(Serialize)]
struct JsonDocument<'a> {
    tree: &'a FileNode,
    stats: &'a TreeStats,
}

/// Pretty-printed JSON with `tree` and `stats` fields.
///
/// Which optional node fields appear is decided when the tree is built
/// (`show_size`, `show_date`), so this formatter needs no configuration.
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, tree: &FileNode, stats: &TreeStats) -> io::Result<String> {
        serde_json::to_string_pretty(&JsonDocument { tree, stats }).map_err(io::Error::other)
    }
}
