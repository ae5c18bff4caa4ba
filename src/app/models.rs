use std::path::PathBuf;

/// A file that made it past the ignore rules.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String,
    pub name: String,
}

/// A directory in the scanned tree. Files and subdirectories are both kept in
/// name order, so rendering is a plain pre-order visit.
#[derive(Debug, Clone)]
pub struct DirNode {
    pub path: PathBuf,
    pub name: String,
    pub depth: usize,
    pub files: Vec<FileEntry>,
    pub subdirs: Vec<DirNode>,
}

impl DirNode {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, depth: usize) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            depth,
            files: Vec::new(),
            subdirs: Vec::new(),
        }
    }

    pub fn dir_count(&self) -> usize {
        1 + self.subdirs.iter().map(DirNode::dir_count).sum::<usize>()
    }

    pub fn file_count(&self) -> usize {
        self.files.len() + self.subdirs.iter().map(DirNode::file_count).sum::<usize>()
    }
}

/// Totals reported after a snapshot is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub dirs: usize,
    pub files: usize,
    pub unreadable: usize,
}
