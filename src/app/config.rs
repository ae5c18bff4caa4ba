use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Name of the report, created in the current working directory.
pub const OUTPUT_FILE_NAME: &str = "temp.txt";

const IGNORED_FILES: &[&str] = &[
    "yarn.lock",
    "temp.py",
    "temp.txt",
    "temp_init.txt",
    "package-lock.json",
    env!("CARGO_PKG_NAME"),
    concat!(env!("CARGO_PKG_NAME"), ".exe"),
];

const IGNORED_FOLDERS: &[&str] = &["node_modules", ".vscode", ".git", ".next"];

const IGNORED_EXTENSIONS: &[&str] = &[".png", ".wav", ".ico", ".svg", ".webp"];

/// Fixed exclusion rules, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    files: HashSet<&'static str>,
    folders: HashSet<&'static str>,
    extensions: HashSet<&'static str>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            files: IGNORED_FILES.iter().copied().collect(),
            folders: IGNORED_FOLDERS.iter().copied().collect(),
            extensions: IGNORED_EXTENSIONS.iter().copied().collect(),
        }
    }
}

impl IgnoreRules {
    pub fn is_ignored_folder(&self, name: &str) -> bool {
        self.folders.contains(name)
    }

    /// Decides whether a file, given relative to the scan root, is left out of the report.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };

        if self.files.contains(name.as_ref()) {
            return true;
        }

        // Path::extension already treats a leading dot as part of the stem
        if let Some(ext) = relative.extension() {
            let dotted = format!(".{}", ext.to_string_lossy().to_lowercase());
            if self.extensions.contains(dotted.as_str()) {
                return true;
            }
        }

        relative.components().any(|c| match c {
            Component::Normal(part) => self.is_ignored_folder(&part.to_string_lossy()),
            _ => false,
        })
    }
}

/// Everything a run needs, resolved before any output is written.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub output_path: PathBuf,
    pub rules: IgnoreRules,
}

impl RuntimeConfig {
    pub fn resolve() -> Result<Self> {
        let current_dir = env::current_dir().context("Failed to get current directory")?;

        Ok(Self {
            root: resolve_root()?,
            output_path: current_dir.join(OUTPUT_FILE_NAME),
            rules: IgnoreRules::default(),
        })
    }
}

/// The scan root is the directory containing the running executable.
fn resolve_root() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    let exe = fs::canonicalize(&exe)
        .with_context(|| format!("Failed to canonicalize {}", exe.display()))?;

    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable {} has no parent directory", exe.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_file_names_are_case_sensitive() {
        let rules = IgnoreRules::default();
        assert!(rules.is_ignored(Path::new("yarn.lock")));
        assert!(rules.is_ignored(Path::new("web/package-lock.json")));
        assert!(!rules.is_ignored(Path::new("Yarn.lock")));
    }

    #[test]
    fn extensions_match_case_insensitively() {
        let rules = IgnoreRules::default();
        assert!(rules.is_ignored(Path::new("logo.png")));
        assert!(rules.is_ignored(Path::new("assets/Logo.PNG")));
        assert!(rules.is_ignored(Path::new("icons/app.Svg")));
        assert!(!rules.is_ignored(Path::new("notes.txt")));
    }

    #[test]
    fn dotfile_named_like_an_extension_is_kept() {
        let rules = IgnoreRules::default();
        assert!(!rules.is_ignored(Path::new(".png")));
    }

    #[test]
    fn any_ignored_folder_in_path_excludes() {
        let rules = IgnoreRules::default();
        assert!(rules.is_ignored(Path::new("node_modules/x.js")));
        assert!(rules.is_ignored(Path::new("pkg/deep/.git/HEAD")));
        assert!(!rules.is_ignored(Path::new("src/node_modules_notes.md")));
    }

    #[test]
    fn own_binary_and_report_are_ignored() {
        let rules = IgnoreRules::default();
        assert!(rules.is_ignored(Path::new(OUTPUT_FILE_NAME)));
        assert!(rules.is_ignored(Path::new(env!("CARGO_PKG_NAME"))));
    }

    #[test]
    fn root_is_executable_dir_and_output_lands_in_cwd() {
        let config = RuntimeConfig::resolve().unwrap();
        let exe = fs::canonicalize(env::current_exe().unwrap()).unwrap();

        assert_eq!(config.root, exe.parent().unwrap());
        assert_eq!(
            config.output_path,
            env::current_dir().unwrap().join(OUTPUT_FILE_NAME)
        );
    }

    #[test]
    fn folder_names_match_exactly() {
        let rules = IgnoreRules::default();
        assert!(rules.is_ignored_folder(".next"));
        assert!(!rules.is_ignored_folder("next"));
        assert!(!rules.is_ignored_folder("Node_Modules"));
    }
}
