// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use self::cli::Cli;
use self::config::{IgnoreRules, RuntimeConfig};
use self::formatter::OutputGenerator;
use self::models::SnapshotSummary;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args (only --help / --version exist)
    let _args = Cli::parse();

    // 2. Resolve root, output location and ignore rules
    let config = RuntimeConfig::resolve()?;
    log::debug!("Scanning {}", config.root.display());

    // 3. Scan and write the report
    let summary = snapshot_with_rules(&config.root, &config.output_path, &config.rules)?;
    log::info!(
        "{} directories, {} files, {} unreadable",
        summary.dirs,
        summary.files,
        summary.unreadable
    );

    // 4. Report completion
    println!(
        "Project structure and file contents have been written to {}",
        config::OUTPUT_FILE_NAME
    );

    Ok(())
}

/// Writes the report for `root` into `output`, truncating any previous report.
pub fn snapshot(root: &Path, output: &Path) -> Result<SnapshotSummary> {
    snapshot_with_rules(root, output, &IgnoreRules::default())
}

fn snapshot_with_rules(root: &Path, output: &Path, rules: &IgnoreRules) -> Result<SnapshotSummary> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    let mut out = BufWriter::new(file);

    let tree = Scanner::new(root.to_path_buf(), rules).scan()?;
    let summary = OutputGenerator::write_snapshot(&mut out, &tree)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush {}", output.display()))?;

    Ok(summary)
}
