use crate::app::models::{DirNode, FileEntry, SnapshotSummary};
use std::fs;
use std::io::{self, Write};

const STRUCTURE_HEADER: &str = "PROJECT FOLDER STRUCTURE:\n=======================\n\n";
const CONTENTS_HEADER: &str = "\n\nFILE CONTENTS:\n=============\n\n";
const INDENT: &str = "    ";
const SEPARATOR_WIDTH: usize = 80;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Writes both sections of the report for an already scanned tree.
    pub fn write_snapshot<W: Write>(out: &mut W, tree: &DirNode) -> io::Result<SnapshotSummary> {
        out.write_all(STRUCTURE_HEADER.as_bytes())?;
        Self::write_tree(out, tree)?;

        out.write_all(CONTENTS_HEADER.as_bytes())?;
        let unreadable = Self::write_contents(out, tree)?;

        Ok(SnapshotSummary {
            dirs: tree.dir_count(),
            files: tree.file_count(),
            unreadable,
        })
    }

    pub fn write_tree<W: Write>(out: &mut W, node: &DirNode) -> io::Result<()> {
        writeln!(out, "{}{}/", INDENT.repeat(node.depth), node.name)?;

        let file_indent = INDENT.repeat(node.depth + 1);
        for file in &node.files {
            writeln!(out, "{}{}", file_indent, file.name)?;
        }

        for subdir in &node.subdirs {
            Self::write_tree(out, subdir)?;
        }
        Ok(())
    }

    /// Returns how many files could not be read. Only failures of `out`
    /// are propagated.
    pub fn write_contents<W: Write>(out: &mut W, node: &DirNode) -> io::Result<usize> {
        let mut unreadable = 0;

        for file in &node.files {
            if !Self::write_file_block(out, file)? {
                unreadable += 1;
            }
        }

        for subdir in &node.subdirs {
            unreadable += Self::write_contents(out, subdir)?;
        }
        Ok(unreadable)
    }

    fn write_file_block<W: Write>(out: &mut W, file: &FileEntry) -> io::Result<bool> {
        let underline = "=".repeat(file.relative_path.chars().count() + 6);
        write!(out, "File: {}\n{}\n\n", file.relative_path, underline)?;

        let readable = match fs::read(&file.path) {
            Ok(bytes) => {
                log::debug!("Writing {}", file.relative_path);
                out.write_all(String::from_utf8_lossy(&bytes).as_bytes())?;
                true
            }
            Err(e) => {
                log::debug!("Error reading file {}: {}", file.relative_path, e);
                writeln!(out, "[Error reading file: {}]", e)?;
                false
            }
        };

        write!(out, "\n\n{}\n\n", "=".repeat(SEPARATOR_WIDTH))?;
        Ok(readable)
    }
}
