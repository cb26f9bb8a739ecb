//! Session archive extraction.
//!
//! A `.tpzx` session file is a zip container. Each one is unpacked into its
//! own directory under a scratch root, and the `TTSession.xml` descriptor is
//! located at the root of the extracted tree.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tally_core::error::{Result, TallyError};
use tracing::debug;

/// Extension of clicker session archives.
pub const ARCHIVE_EXTENSION: &str = "tpzx";

/// Name of the session descriptor inside every archive.
pub const SESSION_DESCRIPTOR: &str = "TTSession.xml";

/// An archive unpacked to disk.
#[derive(Debug, Clone)]
pub struct ExtractedSession {
    /// Display name of the archive this came from.
    pub display_name: String,
    /// Directory holding the extracted tree.
    pub dir: PathBuf,
    /// Path to the session descriptor inside `dir`.
    pub descriptor: PathBuf,
    /// Number of regular files written.
    pub files_extracted: usize,
}

/// Unpacks archives into uniquely named subdirectories of a scratch root.
///
/// The extractor never removes anything; the owner of the scratch root is
/// responsible for cleanup.
pub struct SessionExtractor {
    root: PathBuf,
    used_names: HashSet<String>,
}

impl SessionExtractor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            used_names: HashSet::new(),
        }
    }

    /// Extract `archive_path` and locate its descriptor.
    pub fn extract(&mut self, archive_path: &Path) -> Result<ExtractedSession> {
        let display_name = display_name(&archive_path.to_string_lossy());
        let dir_name = self.claim_dir_name(&display_name);
        let dir = self.root.join(dir_name);

        fs::create_dir_all(&dir)?;
        let files_extracted = extract_zip(archive_path, &dir)?;

        let descriptor = dir.join(SESSION_DESCRIPTOR);
        if !descriptor.is_file() {
            return Err(TallyError::Archive {
                path: archive_path.to_path_buf(),
                reason: format!("{} not found in archive", SESSION_DESCRIPTOR),
            });
        }

        debug!(
            "Extracted {} files from {} into {}",
            files_extracted,
            archive_path.display(),
            dir.display()
        );

        Ok(ExtractedSession {
            display_name,
            dir,
            descriptor,
            files_extracted,
        })
    }

    /// Pick a directory name derived from `base` that no earlier archive in
    /// this run has used. The result is always a single normal path component.
    fn claim_dir_name(&mut self, base: &str) -> String {
        let base = match base {
            "" | "." | ".." => "session",
            _ => base,
        };
        let mut candidate = base.to_string();
        let mut counter = 2;
        while !self.used_names.insert(candidate.clone()) {
            candidate = format!("{} ({})", base, counter);
            counter += 1;
        }
        candidate
    }
}

/// Display name of an archive: its base name without directory or drive
/// prefix and without the `.tpzx` suffix.
///
/// Both `/` and `\` are treated as separators regardless of platform.
pub fn display_name(path: &str) -> String {
    let base = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    let base = match base.as_bytes() {
        [drive, b':', ..] if drive.is_ascii_alphabetic() => &base[2..],
        _ => base,
    };

    let suffix_len = ARCHIVE_EXTENSION.len() + 1;
    if base.len() > suffix_len && base.is_char_boundary(base.len() - suffix_len) {
        let (stem, suffix) = base.split_at(base.len() - suffix_len);
        if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(ARCHIVE_EXTENSION) {
            return stem.to_string();
        }
    }
    base.to_string()
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<usize> {
    let archive_err = |reason: String| TallyError::Archive {
        path: archive_path.to_path_buf(),
        reason,
    };

    let file = fs::File::open(archive_path).map_err(|source| TallyError::FileRead {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| archive_err(format!("not a zip container: {e}")))?;

    let mut count = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| archive_err(format!("failed to read entry {i}: {e}")))?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(archive_err(format!(
                    "entry {:?} escapes the extraction directory",
                    entry.name()
                )))
            }
        };

        let output_path = dest.join(&entry_path);
        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)
                .map_err(|e| archive_err(format!("failed to unpack {:?}: {e}", entry_path)))?;
            count += 1;
        }
    }
    Ok(count)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
