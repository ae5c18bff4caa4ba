use crate::app::config::IgnoreRules;
use crate::app::models::{DirNode, FileEntry};
use anyhow::{Context, Result};
use ignore::{Walk, WalkBuilder};
use pathdiff::diff_paths;
use std::fs;
use std::path::PathBuf;

pub struct Scanner<'a> {
    root: PathBuf,
    rules: &'a IgnoreRules,
}

impl<'a> Scanner<'a> {
    pub fn new(root: PathBuf, rules: &'a IgnoreRules) -> Self {
        Self { root, rules }
    }

    /// Walks the root once and folds the pre-order stream into a `DirNode` tree.
    ///
    /// Ignored folders are pruned inside the walker, so nothing beneath them is
    /// ever read. Errors below the root are logged and skipped; only an
    /// unreadable root is fatal.
    pub fn scan(&self) -> Result<DirNode> {
        fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read root directory {}", self.root.display()))?;

        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());
        let mut root = DirNode::new(&self.root, root_name, 0);
        // open[i] is the directory currently being filled at depth i + 1
        let mut open: Vec<DirNode> = Vec::new();

        for result in self.walker() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    discard_unread_dir(&mut open, &err);
                    continue;
                }
            };

            let depth = entry.depth();
            if depth == 0 {
                continue;
            }
            let Some(file_type) = entry.file_type() else {
                continue;
            };

            close_until(&mut root, &mut open, depth);
            let name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_dir() {
                open.push(DirNode::new(entry.path(), name, depth));
                continue;
            }

            // Links are not followed. Only regular files, links to regular
            // files and dangling links are reported; fifos, sockets and
            // devices would block or fail on read.
            let reportable = if file_type.is_symlink() {
                fs::metadata(entry.path()).map_or(true, |meta| meta.is_file())
            } else {
                file_type.is_file()
            };
            if !reportable {
                log::debug!("Skipping non-regular entry {}", entry.path().display());
                continue;
            }

            let Some(relative) = diff_paths(entry.path(), &self.root) else {
                log::warn!("Cannot relate {} to the root", entry.path().display());
                continue;
            };
            if self.rules.is_ignored(&relative) {
                log::debug!("Ignoring {}", relative.display());
                continue;
            }

            let parent = open.last_mut().unwrap_or(&mut root);
            parent.files.push(FileEntry {
                path: entry.path().to_path_buf(),
                relative_path: relative.to_string_lossy().into_owned(),
                name,
            });
        }

        close_until(&mut root, &mut open, 1);
        Ok(root)
    }

    fn walker(&self) -> Walk {
        let rules = self.rules.clone();

        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                if entry.depth() == 0 || !is_dir {
                    return true;
                }
                let pruned = rules.is_ignored_folder(&entry.file_name().to_string_lossy());
                if pruned {
                    log::debug!("Pruning {}", entry.path().display());
                }
                !pruned
            })
            .build()
    }
}

/// A directory that failed to open is reported by the walker right after its
/// own entry, so it is still the innermost open node and has no children.
/// It is dropped rather than rendered as empty.
fn discard_unread_dir(open: &mut Vec<DirNode>, err: &ignore::Error) {
    if let ignore::Error::WithPath { path, .. } = err {
        if open.last().is_some_and(|dir| &dir.path == path) {
            open.pop();
        }
    }
}

/// Attaches every open directory deeper than `depth - 1` to its parent.
fn close_until(root: &mut DirNode, open: &mut Vec<DirNode>, depth: usize) {
    while open.len() >= depth {
        let Some(done) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.subdirs.push(done),
            None => root.subdirs.push(done),
        }
    }
}
