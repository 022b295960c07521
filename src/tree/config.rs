//! Configuration types for tree building

use std::path::PathBuf;

use regex::Regex;

/// Excludes applied by the `quick` preset.
const QUICK_EXCLUDES: &[&str] = &["node_modules", ".git", "dist", "build", ".next", ".nuxt"];

/// Excludes the `dev` preset adds on top of [`QUICK_EXCLUDES`].
const DEV_EXCLUDES: &[&str] = &[
    "coverage",
    ".nyc_output",
    ".cache",
    "tmp",
    "temp",
    "*.log",
    ".DS_Store",
    "Thumbs.db",
];

/// Configuration for tree building behavior.
///
/// The struct is immutable once handed to a [`TreeBuilder`](super::TreeBuilder);
/// every build reads it but never changes it.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub root: PathBuf,
    /// Levels below the root that get expanded. `None` means unlimited.
    pub max_depth: Option<usize>,
    /// Glob-style patterns matched against both bare names and full paths.
    pub exclude: Vec<String>,
    /// Extension whitelist; when non-empty `exclude_types` is not consulted.
    pub include_types: Vec<String>,
    pub exclude_types: Vec<String>,
    /// Regular expression matched against the bare entry name.
    pub ignore_pattern: Option<Regex>,
    pub show_hidden: bool,
    pub show_size: bool,
    pub show_date: bool,
    pub dirs_only: bool,
    /// Only read by the text formatter.
    pub colorize: bool,
}

impl TreeConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Apply a preset's depth and prepend its default excludes.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.max_depth = Some(preset.max_depth());
        let mut exclude: Vec<String> = preset
            .default_excludes()
            .into_iter()
            .map(str::to_string)
            .collect();
        exclude.append(&mut self.exclude);
        self.exclude = exclude;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_depth: None,
            exclude: Vec::new(),
            include_types: Vec::new(),
            exclude_types: Vec::new(),
            ignore_pattern: None,
            show_hidden: false,
            show_size: false,
            show_date: false,
            dirs_only: false,
            colorize: true,
        }
    }
}

/// Canned option bundles for common project layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Shallow view that skips build output and VCS metadata.
    Quick,
    /// Deeper view that also skips caches, temp dirs and logs.
    Dev,
}

impl Preset {
    pub fn max_depth(self) -> usize {
        match self {
            Preset::Quick => 3,
            Preset::Dev => 4,
        }
    }

    pub fn default_excludes(self) -> Vec<&'static str> {
        match self {
            Preset::Quick => QUICK_EXCLUDES.to_vec(),
            Preset::Dev => QUICK_EXCLUDES.iter().chain(DEV_EXCLUDES).copied().collect(),
        }
    }
}
