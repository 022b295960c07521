//! Output configuration types

use crate::tree::TreeConfig;

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub show_size: bool,
    pub show_date: bool,
    /// Emit ANSI colours (text format only)
    pub use_color: bool,
}

impl From<&TreeConfig> for OutputConfig {
    fn from(config: &TreeConfig) -> Self {
        Self {
            show_size: config.show_size,
            show_date: config.show_date,
            use_color: config.colorize,
        }
    }
}
