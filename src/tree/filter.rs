//! Entry filtering for tree building
//!
//! Filtering happens in two stages. [`NameFilter`] runs on the raw listing
//! before anything is stat'ed (hidden names, exclude patterns, ignore regex).
//! [`TypeFilter`] runs afterwards and only on non-directories.

use regex::Regex;

use super::config::TreeConfig;
use super::pattern::PatternMatcher;
use super::utils::extension_of;

/// Normalize an extension token: lower-case, leading dot stripped.
fn normalize_type(token: &str) -> String {
    token.strip_prefix('.').unwrap_or(token).to_lowercase()
}

/// Extension-based include/exclude rule for files.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl TypeFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: include.iter().map(|t| normalize_type(t.as_ref())).collect(),
            exclude: exclude.iter().map(|t| normalize_type(t.as_ref())).collect(),
        }
    }

    /// Decide whether a file with this name is kept.
    ///
    /// A non-empty include list wins outright and the exclude list is not
    /// consulted. Files without an extension match no token.
    pub fn should_include_file(&self, file_name: &str) -> bool {
        let ext = extension_of(file_name);
        let matches_any =
            |tokens: &[String]| ext.as_deref().is_some_and(|e| tokens.iter().any(|t| t == e));

        if !self.include.is_empty() {
            matches_any(&self.include)
        } else if !self.exclude.is_empty() {
            !matches_any(&self.exclude)
        } else {
            true
        }
    }
}

/// Functional form of [`TypeFilter::should_include_file`].
pub fn should_include_file<S: AsRef<str>>(
    file_name: &str,
    include_types: &[S],
    exclude_types: &[S],
) -> bool {
    TypeFilter::new(include_types, exclude_types).should_include_file(file_name)
}

/// Name-level filter applied to each raw directory entry.
#[derive(Debug, Clone)]
pub struct NameFilter {
    show_hidden: bool,
    patterns: PatternMatcher,
    ignore: Option<Regex>,
}

impl NameFilter {
    pub fn from_config(config: &TreeConfig) -> Self {
        Self {
            show_hidden: config.show_hidden,
            patterns: PatternMatcher::new(config.exclude.as_slice()),
            ignore: config.ignore_pattern.clone(),
        }
    }

    /// True if the entry is dropped before it is stat'ed.
    pub fn is_skipped(&self, name: &str, full_path: &str) -> bool {
        if !self.show_hidden && name.starts_with('.') {
            return true;
        }
        if self.patterns.is_excluded(name, full_path) {
            return true;
        }
        self.ignore.as_ref().is_some_and(|re| re.is_match(name))
    }
}
