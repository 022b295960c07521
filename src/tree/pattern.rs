//! Glob-style exclude patterns
//!
//! Patterns support two wildcards: `*` (any run of characters, including
//! none) and `?` (exactly one character). Everything else, including `.`,
//! `[` and `/`, is literal. Matching is case-insensitive (full Unicode
//! lower-casing of both sides) and anchored at both ends, so `build` matches a name but never a path containing `build`;
//! write `*/build/*` for that.

use glob::{MatchOptions, Pattern, PatternError};

// Both sides are lower-cased up front; glob's own folding is ASCII-only
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Translate an exclude pattern into a lower-cased `glob::Pattern` with only
/// `*` and `?` left special.
fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    let mut translated = String::with_capacity(pattern.len());
    let mut prev_star = false;
    for c in pattern.to_lowercase().chars() {
        match c {
            // glob rejects `**` outside a whole path component; a run of
            // stars means the same thing as one here
            '*' if prev_star => continue,
            '*' | '?' => translated.push(c),
            _ => translated.push_str(&Pattern::escape(c.encode_utf8(&mut [0; 4]))),
        }
        prev_star = c == '*';
    }
    Pattern::new(&translated)
}

/// Check a single candidate against a single pattern.
pub fn matches(candidate: &str, pattern: &str) -> bool {
    compile(pattern)
        .map(|p| p.matches_with(&candidate.to_lowercase(), MATCH_OPTIONS))
        .unwrap_or(false)
}

/// A compiled set of exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<Pattern>,
}

impl PatternMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match compile(p.as_ref()) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    log::warn!("Ignoring exclude pattern {:?}: {}", p.as_ref(), e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any pattern matches the bare name or the full path.
    pub fn is_excluded(&self, name: &str, full_path: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let name = name.to_lowercase();
        let full_path = full_path.to_lowercase();
        self.patterns.iter().any(|p| {
            p.matches_with(&name, MATCH_OPTIONS) || p.matches_with(&full_path, MATCH_OPTIONS)
        })
    }
}
