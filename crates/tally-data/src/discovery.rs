//! Locating roster and session files on disk.

use std::path::{Path, PathBuf};

use tally_core::error::{Result, TallyError};
use tracing::{debug, warn};

use crate::extractor::ARCHIVE_EXTENSION;

/// Extension of roster tables.
pub const ROSTER_EXTENSION: &str = "csv";

/// Word that selects every session archive in the working directory.
pub const ALL_ARCHIVES: &str = "all";

/// Session archives directly inside `dir`, sorted by path.
pub fn find_archives(dir: &Path) -> Vec<PathBuf> {
    find_with_extension(dir, ARCHIVE_EXTENSION)
}

/// Roster candidates directly inside `dir`, sorted by path.
pub fn find_rosters(dir: &Path) -> Vec<PathBuf> {
    find_with_extension(dir, ROSTER_EXTENSION)
}

/// Turn command-line archive arguments into concrete paths.
///
/// * `all` expands to [`find_archives`] of `cwd`.
/// * Arguments with glob metacharacters are matched relative to `cwd`;
///   a pattern that matches nothing is an error.
/// * Anything else is a path, resolved against `cwd` when relative.
///
/// Order follows the arguments; duplicates are kept.
pub fn expand_archive_args(args: &[String], cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for arg in args {
        if arg == ALL_ARCHIVES {
            let found = find_archives(cwd);
            if found.is_empty() {
                return Err(TallyError::NoInputFiles(format!(
                    "no .{} files in {}",
                    ARCHIVE_EXTENSION,
                    cwd.display()
                )));
            }
            paths.extend(found);
        } else if is_glob_pattern(arg) {
            paths.extend(expand_glob(arg, cwd)?);
        } else {
            paths.push(cwd.join(arg));
        }
    }

    debug!("Resolved {} archive arguments to {} files", args.len(), paths.len());
    Ok(paths)
}

fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(|c: char| matches!(c, '*' | '?' | '['))
}

fn expand_glob(pattern: &str, cwd: &Path) -> Result<Vec<PathBuf>> {
    let full = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let base = glob::Pattern::escape(&cwd.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), pattern)
    };

    let entries = glob::glob(&full)
        .map_err(|e| TallyError::Config(format!("bad file pattern {pattern:?}: {e}")))?;

    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable match for {}: {}", pattern, e),
        }
    }

    if matches.is_empty() {
        return Err(TallyError::NoInputFiles(format!(
            "pattern {pattern:?} matched no files"
        )));
    }
    matches.sort();
    Ok(matches)
}

fn find_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Tests ─────────────────────────────────────────────────────────────────────
