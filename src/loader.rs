// src/loader.rs
//! Walks a directory of Java sources, parses them, and feeds every
//! successfully lowered unit to the registered analyzers.
//!
//! Per-file problems (unreadable or unparseable files) never abort the run:
//! they become diagnostic strings and the file contributes no records. Only
//! an invalid root is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::analysis::UnitAnalyzer;
use crate::error::{MetricsError, Result};
use crate::parse;
use crate::source::CompilationUnit;

/// Loads every `*.java` file under `root` and routes each parsed unit to all
/// `analyzers`. Returns the per-file failure diagnostics.
///
/// Analyzers are reset before the first unit is delivered, so repeated loads
/// fully replace earlier results. Parsing runs in parallel, but results are
/// merged in walk order: each file's records land as one contiguous batch.
///
/// # Errors
/// Returns [`MetricsError::InvalidRoot`] when `root` is not a directory, and
/// [`MetricsError::Io`] when the walk itself cannot start.
pub fn load_directory(root: &Path, analyzers: &mut [&mut dyn UnitAnalyzer]) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(MetricsError::InvalidRoot(root.to_path_buf()));
    }

    let mut diagnostics = Vec::new();
    let files = walk_java_files(root, &mut diagnostics)?;

    let parsed: Vec<std::result::Result<(String, CompilationUnit), String>> = files
        .par_iter()
        .map(|path| parse_one(path, root))
        .collect();

    for analyzer in analyzers.iter_mut() {
        analyzer.reset();
    }
    for result in parsed {
        match result {
            Ok((relative_path, unit)) => {
                for analyzer in analyzers.iter_mut() {
                    analyzer.analyze_unit(&unit, &relative_path);
                }
            }
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    Ok(diagnostics)
}

fn walk_java_files(root: &Path, diagnostics: &mut Vec<String>) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

    let mut files = Vec::new();
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && is_java_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            // Depth 0 means the walk itself could not start.
            Err(e) if e.depth() == 0 => {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(MetricsError::Io { source, path });
            }
            Err(e) => diagnostics.push(format!("Failed to read: {e}")),
        }
    }
    Ok(files)
}

fn is_java_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "java")
}

fn parse_one(path: &Path, root: &Path) -> std::result::Result<(String, CompilationUnit), String> {
    let relative_path = relative_name(path, root);
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read: {relative_path} ({e})"))?;
    let unit = parse::parse_unit(&source)
        .map_err(|e| format!("Failed to parse: {relative_path} ({e})"))?;
    Ok((relative_path, unit))
}

/// Path relative to the scanned root, with forward slashes (cross-platform
/// report output).
fn relative_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
