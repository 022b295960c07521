//! Markdown output formatting
//!
//! Renders the tree as a nested bullet list under a heading, followed by a
//! statistics section. Suitable for pasting into documentation.

use std::io;

use crate::tree::{FileNode, TreeStats};

use super::Formatter;
use super::config::OutputConfig;
use super::utils::format_size;

/// Markdown output formatter.
pub struct MarkdownFormatter {
    config: OutputConfig,
}

impl MarkdownFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn push_children(&self, output: &mut String, children: &[FileNode], level: usize) {
        let indent = "  ".repeat(level);

        for child in children {
            output.push_str(&indent);
            output.push_str("- ");
            if child.is_directory {
                // Directories in bold
                output.push_str("**");
                output.push_str(&child.name);
                output.push_str("**/");
            } else {
                output.push_str(&child.name);
                if self.config.show_size {
                    if let Some(bytes) = child.size {
                        output.push_str(" _(");
                        output.push_str(&format_size(bytes));
                        output.push_str(")_");
                    }
                }
            }
            output.push('\n');

            self.push_children(output, child.child_nodes(), level + 1);
        }
    }
}

impl Formatter for MarkdownFormatter {
    fn format(&self, tree: &FileNode, stats: &TreeStats) -> io::Result<String> {
        let mut output = format!("# Directory Tree: {}\n\n", tree.name);

        output.push_str("- **");
        output.push_str(&tree.name);
        output.push_str("**");
        if tree.is_directory {
            output.push('/');
        }
        output.push('\n');
        self.push_children(&mut output, tree.child_nodes(), 1);

        output.push_str("\n## Statistics\n\n");
        output.push_str(&format!("- **Directories**: {}\n", stats.total_directories));
        output.push_str(&format!("- **Files**: {}", stats.total_files));
        if self.config.show_size {
            output.push_str(&format!(
                "\n- **Total Size**: {}",
                format_size(stats.total_size)
            ));
        }
        Ok(output)
    }
}
