//! Shared utility functions for tree building

use std::cell::RefCell;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use feruca::{Collator, Locale, Tailoring};

use super::node::FileNode;

/// Lower-cased extension of a file name, without the dot.
///
/// Follows path-extension rules: `.bashrc` and `Makefile` have none,
/// `archive.tar.gz` has `gz`.
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Name of a path for display, defaulting to the full path for roots like `/`.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Lexically resolve `.` and `..` in an absolute path without touching the
/// filesystem. `..` at the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

thread_local! {
    // Root locale, punctuation non-ignorable
    static COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::Cldr(Locale::Root), false, true));
}

/// Unicode collation order: punctuation and symbols before digits, digits
/// before letters, accents secondary, lowercase before uppercase on ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Directories first, then by name.
pub fn compare_nodes(a: &FileNode, b: &FileNode) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| compare_names(&a.name, &b.name))
}
