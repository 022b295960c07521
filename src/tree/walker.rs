//! TreeBuilder - walks a directory and builds the full tree in memory

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::BuildError;

use super::config::TreeConfig;
use super::diagnostics::{DiagnosticSink, LogSink, WalkWarning};
use super::filter::{NameFilter, TypeFilter};
use super::node::{FileNode, TreeStats};
use super::utils::{compare_nodes, display_name, normalize_path};

/// Recursive, depth-first directory walker.
///
/// Each call to [`build`](Self::build) or [`build_with`](Self::build_with)
/// starts from fresh statistics, so a builder can be reused.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: TreeConfig,
    names: NameFilter,
    types: TypeFilter,
}

impl TreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        let names = NameFilter::from_config(&config);
        let types = TypeFilter::new(
            config.include_types.as_slice(),
            config.exclude_types.as_slice(),
        );
        Self {
            config,
            names,
            types,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Build the tree, sending warnings to the `log` facade.
    pub fn build(&self) -> Result<(FileNode, TreeStats), BuildError> {
        self.build_with(&mut LogSink)
    }

    /// Build the tree, sending warnings to `sink`.
    ///
    /// Fails only if the root itself cannot be stat'ed.
    pub fn build_with<S>(&self, sink: &mut S) -> Result<(FileNode, TreeStats), BuildError>
    where
        S: DiagnosticSink + ?Sized,
    {
        let root = std::path::absolute(&self.config.root)
            .map(|p| normalize_path(&p))
            .map_err(|source| BuildError::RootInaccessible {
                path: self.config.root.clone(),
                source,
            })?;
        let metadata = fs::metadata(&root).map_err(|source| BuildError::RootInaccessible {
            path: root.clone(),
            source,
        })?;

        let mut walk = Walk {
            builder: self,
            sink,
            stats: TreeStats::default(),
            ancestors: Vec::new(),
        };
        let tree = walk.visit(display_name(&root), &root, &metadata, 0);
        Ok((tree, walk.stats))
    }

    fn at_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth >= max)
    }
}

/// State for a single build.
struct Walk<'a, S: ?Sized> {
    builder: &'a TreeBuilder,
    sink: &'a mut S,
    stats: TreeStats,
    /// Canonical paths of the directories currently being expanded.
    ancestors: Vec<PathBuf>,
}

impl<S: DiagnosticSink + ?Sized> Walk<'_, S> {
    fn visit(&mut self, name: String, path: &Path, metadata: &Metadata, depth: usize) -> FileNode {
        let config = &self.builder.config;
        let mut node = FileNode::new(name, path, metadata.is_dir(), depth);

        if config.show_size && !node.is_directory {
            node.size = Some(metadata.len());
        }
        if config.show_date {
            node.modified_time = metadata.modified().ok().map(DateTime::<Utc>::from);
        }

        self.stats.record(&node);

        if node.is_directory && !self.builder.at_max_depth(depth) {
            node.children = self.expand(path, depth);
        }
        node
    }

    /// List a directory and visit every entry that survives filtering.
    /// Returns `None` if the directory cannot be expanded.
    fn expand(&mut self, path: &Path, depth: usize) -> Option<Vec<FileNode>> {
        let canonical = fs::canonicalize(path).ok();
        if let Some(ref c) = canonical {
            if self.ancestors.contains(c) {
                self.sink.warn(WalkWarning::SymlinkCycle {
                    path: path.to_path_buf(),
                });
                return None;
            }
        }

        let entries = match fs::read_dir(path) {
            Ok(e) => e,
            Err(source) => {
                self.sink.warn(WalkWarning::UnreadableDirectory {
                    path: path.to_path_buf(),
                    source,
                });
                return None;
            }
        };

        if let Some(c) = canonical.clone() {
            self.ancestors.push(c);
        }

        let mut children = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(source) => {
                    self.warn_entry(path, source);
                    continue;
                }
            };
            if let Some(child) = self.visit_entry(&entry.path(), depth) {
                children.push(child);
            }
        }
        children.sort_by(compare_nodes);

        if canonical.is_some() {
            self.ancestors.pop();
        }
        Some(children)
    }

    fn visit_entry(&mut self, entry_path: &Path, depth: usize) -> Option<FileNode> {
        let builder = self.builder;
        let name = display_name(entry_path);

        if builder
            .names
            .is_skipped(&name, &entry_path.to_string_lossy())
        {
            return None;
        }

        // Follows symlinks; a dangling link fails here and is skipped
        let metadata = match fs::metadata(entry_path) {
            Ok(m) => m,
            Err(source) => {
                self.warn_entry(entry_path, source);
                return None;
            }
        };

        if !metadata.is_dir()
            && (builder.config.dirs_only || !builder.types.should_include_file(&name))
        {
            return None;
        }

        Some(self.visit(name, entry_path, &metadata, depth + 1))
    }

    fn warn_entry(&mut self, path: &Path, source: io::Error) {
        self.sink.warn(WalkWarning::UnreadableEntry {
            path: path.to_path_buf(),
            source,
        });
    }
}

/// Build a tree for `config`, logging warnings through the `log` facade.
pub fn build_tree(config: &TreeConfig) -> Result<(FileNode, TreeStats), BuildError> {
    TreeBuilder::new(config.clone()).build()
}

/// Resolve a user-supplied root to an absolute, `..`-free path and check that
/// it is an existing directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, BuildError> {
    let resolved = std::path::absolute(path)
        .map(|p| normalize_path(&p))
        .map_err(|source| BuildError::RootInaccessible {
            path: path.to_path_buf(),
            source,
        })?;
    match fs::metadata(&resolved) {
        Ok(m) if m.is_dir() => Ok(resolved),
        Ok(_) => Err(BuildError::NotADirectory { path: resolved }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(BuildError::RootNotFound { path: resolved })
        }
        Err(source) => Err(BuildError::RootInaccessible {
            path: resolved,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;

    fn build(config: TreeConfig) -> (FileNode, TreeStats, Vec<WalkWarning>) {
        let mut warnings: Vec<WalkWarning> = Vec::new();
        let (tree, stats) = TreeBuilder::new(config).build_with(&mut warnings).unwrap();
        (tree, stats, warnings)
    }

    fn names(node: &FileNode) -> Vec<&str> {
        node.child_nodes().iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_basic_tree() {
        let fixture = TestTree::sample_project();
        let (tree, stats, warnings) = build(TreeConfig::new(fixture.path().join("root")));

        assert_eq!(tree.name, "root");
        assert!(tree.is_directory);
        assert_eq!(tree.depth, 0);
        assert_eq!(names(&tree), vec!["dir1", "file2.js"]);
        assert_eq!(names(&tree.child_nodes()[0]), vec!["file1.txt"]);
        assert_eq!(stats.total_directories, 2);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_size, 0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_paths_are_absolute() {
        let fixture = TestTree::sample_project();
        let (tree, _, _) = build(TreeConfig::new(fixture.path().join("root")));
        assert!(tree.iter().all(|n| n.path.is_absolute()));
        assert_eq!(
            tree.child_nodes()[1].path,
            fixture.path().join("root").join("file2.js")
        );
    }

    #[test]
    fn test_sizes_only_when_requested() {
        let fixture = TestTree::sample_project();
        let config = TreeConfig {
            show_size: true,
            ..TreeConfig::new(fixture.path().join("root"))
        };
        let (tree, stats, _) = build(config);
        assert_eq!(stats.total_size, 300);
        assert_eq!(tree.size, None, "directories carry no size");
        assert_eq!(tree.child_nodes()[1].size, Some(200));
    }

    #[test]
    fn test_dates_only_when_requested() {
        let fixture = TestTree::sample_project();
        let (tree, _, _) = build(TreeConfig::new(fixture.path()));
        assert!(tree.iter().all(|n| n.modified_time.is_none()));

        let config = TreeConfig {
            show_date: true,
            ..TreeConfig::new(fixture.path())
        };
        let (tree, _, _) = build(config);
        assert!(tree.iter().all(|n| n.modified_time.is_some()));
    }

    #[test]
    fn test_dirs_before_files_then_by_name() {
        let fixture = TestTree::new();
        fixture.add_file("b.txt", "");
        fixture.add_file("A.txt", "");
        fixture.add_dir("zeta");
        fixture.add_dir("alpha");
        fixture.add_file("c.md", "");

        let (tree, _, _) = build(TreeConfig::new(fixture.path()));
        assert_eq!(names(&tree), vec!["alpha", "zeta", "A.txt", "b.txt", "c.md"]);
    }

    #[test]
    fn test_max_depth_zero_lists_root_only() {
        let fixture = TestTree::sample_project();
        let config = TreeConfig {
            max_depth: Some(0),
            ..TreeConfig::new(fixture.path().join("root"))
        };
        let (tree, stats, _) = build(config);
        assert!(!tree.is_expanded());
        assert_eq!(stats.total_directories, 1);
        assert_eq!(stats.total_files, 0);
    }

    #[test]
    fn test_max_depth_caps_expansion() {
        let fixture = TestTree::new();
        fixture.add_file("l1/l2/l3/deep.txt", "");
        let config = TreeConfig {
            max_depth: Some(2),
            ..TreeConfig::new(fixture.path())
        };
        let (tree, stats, _) = build(config);

        let l2 = tree.find(&fixture.path().join("l1/l2")).unwrap();
        assert_eq!(l2.depth, 2);
        assert!(!l2.is_expanded(), "directory at the cap is not expanded");
        assert!(tree.iter().all(|n| n.depth <= 2));
        assert_eq!(stats.total_directories, 3);
    }

    #[test]
    fn test_empty_dir_is_expanded_with_no_children() {
        let fixture = TestTree::new();
        fixture.add_dir("empty");
        let (tree, _, _) = build(TreeConfig::new(fixture.path()));
        let empty = &tree.child_nodes()[0];
        assert_eq!(empty.children, Some(Vec::new()));
    }

    #[test]
    fn test_hidden_entries() {
        let fixture = TestTree::new();
        fixture.add_file(".env", "");
        fixture.add_file(".config/settings.json", "");
        fixture.add_file("visible.txt", "");

        let (tree, stats, _) = build(TreeConfig::new(fixture.path()));
        assert_eq!(names(&tree), vec!["visible.txt"]);
        assert_eq!(stats.total_files, 1);

        let config = TreeConfig {
            show_hidden: true,
            ..TreeConfig::new(fixture.path())
        };
        let (tree, _, _) = build(config);
        assert_eq!(names(&tree), vec![".config", ".env", "visible.txt"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let fixture = TestTree::new();
        fixture.add_file("app.log", "");
        fixture.add_file("src/server.LOG", "");
        fixture.add_file("src/main.rs", "");
        fixture.add_file("node_modules/pkg/index.js", "");
        fixture.add_file("src/node_modules/x.js", "");

        let config = TreeConfig {
            exclude: vec!["*.log".to_string(), "NODE_MODULES".to_string()],
            ..TreeConfig::new(fixture.path())
        };
        let (tree, _, _) = build(config);
        let all: Vec<_> = tree.iter().skip(1).map(|n| n.name.as_str()).collect();
        assert_eq!(all, vec!["src", "main.rs"]);
    }

    #[test]
    fn test_exclude_full_path_pattern() {
        let fixture = TestTree::new();
        fixture.add_file("a/build/out.o", "");
        fixture.add_file("a/keep.c", "");
        let config = TreeConfig {
            exclude: vec!["*/build/*".to_string()],
            ..TreeConfig::new(fixture.path())
        };
        let (tree, _, _) = build(config);
        let build_dir = tree.find(&fixture.path().join("a/build")).unwrap();
        assert_eq!(build_dir.children, Some(Vec::new()));
    }

    #[test]
    fn test_ignore_regex_matches_name() {
        let fixture = TestTree::new();
        fixture.add_file("test_a.py", "");
        fixture.add_file("a.py", "");
        let config = TreeConfig {
            ignore_pattern: Some(regex::Regex::new(r"^test_").unwrap()),
            ..TreeConfig::new(fixture.path())
        };
        let (tree, _, _) = build(config);
        assert_eq!(names(&tree), vec!["a.py"]);
    }

    #[test]
    fn test_include_types_never_prune_dirs() {
        let fixture = TestTree::new();
        fixture.add_file("src/app.js", "");
        fixture.add_file("src/app.css", "");
        fixture.add_file("package.json", "");
        fixture.add_file("README.md", "");
        let config = TreeConfig {
            include_types: vec!["js".to_string(), ".json".to_string()],
            exclude_types: vec!["js".to_string()],
            ..TreeConfig::new(fixture.path())
        };
        let (tree, stats, _) = build(config);
        assert_eq!(names(&tree), vec!["src", "package.json"]);
        assert_eq!(names(&tree.child_nodes()[0]), vec!["app.js"]);
        assert_eq!(stats.total_files, 2);
    }

    #[test]
    fn test_exclude_types() {
        let fixture = TestTree::new();
        fixture.add_file("a.tmp", "");
        fixture.add_file("b.rs", "");
        let config = TreeConfig {
            exclude_types: vec!["TMP".to_string()],
            ..TreeConfig::new(fixture.path())
        };
        let (tree, _, _) = build(config);
        assert_eq!(names(&tree), vec!["b.rs"]);
    }

    #[test]
    fn test_dirs_only() {
        let fixture = TestTree::sample_project();
        let config = TreeConfig {
            dirs_only: true,
            ..TreeConfig::new(fixture.path())
        };
        let (tree, stats, _) = build(config);
        assert!(tree.iter().all(|n| n.is_directory));
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_directories, 3);
    }

    #[test]
    fn test_missing_root_fails() {
        let fixture = TestTree::new();
        let err = TreeBuilder::new(TreeConfig::new(fixture.path().join("missing")))
            .build_with(&mut Vec::<WalkWarning>::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::RootInaccessible { .. }));
    }

    #[test]
    fn test_builder_reuse_resets_stats() {
        let fixture = TestTree::sample_project();
        let builder = TreeBuilder::new(TreeConfig::new(fixture.path()));
        let (_, first) = builder.build_with(&mut Vec::<WalkWarning>::new()).unwrap();
        let (_, second) = builder.build_with(&mut Vec::<WalkWarning>::new()).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_warns_and_continues() {
        let fixture = TestTree::new();
        fixture.add_file("real.txt", "");
        std::os::unix::fs::symlink("nowhere.txt", fixture.path().join("broken.txt")).unwrap();

        let (tree, _, warnings) = build(TreeConfig::new(fixture.path()));
        assert_eq!(names(&tree), vec!["real.txt"]);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], WalkWarning::UnreadableEntry { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_not_expanded() {
        let fixture = TestTree::new();
        fixture.add_file("sub/file.txt", "");
        std::os::unix::fs::symlink("..", fixture.path().join("sub/parent")).unwrap();

        let (tree, _, warnings) = build(TreeConfig::new(fixture.path()));
        let link = tree.find(&fixture.path().join("sub/parent")).unwrap();
        assert!(link.is_directory);
        assert!(!link.is_expanded());
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, WalkWarning::SymlinkCycle { .. }))
        );
    }

    #[test]
    fn test_resolve_root() {
        let fixture = TestTree::sample_project();
        assert!(resolve_root(fixture.path()).is_ok());
        assert!(matches!(
            resolve_root(&fixture.path().join("nope")),
            Err(BuildError::RootNotFound { .. })
        ));
        assert!(matches!(
            resolve_root(&fixture.path().join("root/file2.js")),
            Err(BuildError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_parent_components_are_resolved() {
        let fixture = TestTree::new();
        fixture.add_file("proj/sub/inner.txt", "");
        fixture.add_file("proj/top.txt", "");

        let root = resolve_root(&fixture.path().join("proj/sub/..")).unwrap();
        assert_eq!(root, fixture.path().join("proj"));

        let (tree, _, _) = build(TreeConfig::new(fixture.path().join("proj/./sub/..")));
        assert_eq!(tree.name, "proj");
        assert_eq!(tree.path, fixture.path().join("proj"));
        let top = tree.find(&fixture.path().join("proj/top.txt"));
        assert!(top.is_some(), "child paths carry no `..`");
    }
}
