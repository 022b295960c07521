//! Text formatter
//!
//! Renders a tree with box-drawing connectors followed by a summary line.
//! Colours are written as ANSI escapes into an in-memory buffer so the
//! result is still a plain `String`.

use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::tree::{FileNode, TreeStats, extension_of};

use super::Formatter;
use super::config::OutputConfig;
use super::utils::{child_prefix, connector, format_date, format_size};

/// Formatter for `tree`-style text output.
pub struct TextFormatter {
    config: OutputConfig,
}

impl TextFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Name plus the optional size and date suffixes.
    fn label(&self, node: &FileNode) -> String {
        let mut label = node.name.clone();
        if self.config.show_size && !node.is_directory {
            if let Some(size) = node.size {
                label.push_str(&format!(" ({})", format_size(size)));
            }
        }
        if self.config.show_date {
            if let Some(ref time) = node.modified_time {
                label.push_str(&format!(" [{}]", format_date(time)));
            }
        }
        label
    }

    fn summary(&self, stats: &TreeStats) -> String {
        let mut summary = format!(
            "{} directories, {} files",
            stats.total_directories, stats.total_files
        );
        if self.config.show_size {
            summary.push_str(&format!(", {} total", format_size(stats.total_size)));
        }
        summary
    }

    fn write_line(&self, out: &mut Buffer, prefix: &str, node: &FileNode) -> io::Result<()> {
        write!(out, "{}", prefix)?;
        out.set_color(&node_color(node))?;
        write!(out, "{}", self.label(node))?;
        out.reset()?;
        writeln!(out)
    }

    fn write_children(&self, out: &mut Buffer, children: &[FileNode], prefix: &str) -> io::Result<()> {
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            self.write_line(out, &format!("{}{}", prefix, connector(is_last)), child)?;
            if !child.child_nodes().is_empty() {
                self.write_children(out, child.child_nodes(), &child_prefix(prefix, is_last))?;
            }
        }
        Ok(())
    }

    fn write_tree(&self, out: &mut Buffer, tree: &FileNode, stats: &TreeStats) -> io::Result<()> {
        // Root node - print without connector
        self.write_line(out, "", tree)?;
        self.write_children(out, tree.child_nodes(), "")?;
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{}", self.summary(stats))?;
        out.reset()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, tree: &FileNode, stats: &TreeStats) -> io::Result<String> {
        let mut out = if self.config.use_color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        self.write_tree(&mut out, tree, stats)?;
        Ok(String::from_utf8_lossy(out.as_slice()).into_owned())
    }
}

/// Colour for a node: bold blue directories, files by extension family.
fn node_color(node: &FileNode) -> ColorSpec {
    let mut spec = ColorSpec::new();
    if node.is_directory {
        spec.set_fg(Some(Color::Blue)).set_bold(true);
        return spec;
    }
    let color = match extension_of(&node.name).as_deref() {
        Some("js" | "ts" | "jsx" | "tsx") => Color::Yellow,
        Some("json") => Color::Green,
        Some("md" | "txt") => Color::White,
        Some("css" | "scss" | "sass") => Color::Magenta,
        Some("html" | "htm") => Color::Red,
        _ => {
            spec.set_dimmed(true);
            Color::White
        }
    };
    spec.set_fg(Some(color));
    spec
}
