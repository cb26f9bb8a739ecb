//! Class roster loading.
//!
//! A roster is a delimited text table with a header line followed by
//! `deviceid,last,first` rows. Fields may be separated by commas, semicolons
//! or tabs, mixed freely.

use std::path::Path;

use regex::Regex;
use tally_core::error::{Result, TallyError};
use tally_core::models::{DeviceId, Roster, RosterEntry};
use tracing::{debug, warn};

/// Read and parse the roster at `path`.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path).map_err(|source| TallyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let roster = parse_roster(&content)?;
    debug!("Loaded {} roster entries from {}", roster.len(), path.display());
    Ok(roster)
}

/// Parse roster text. The first line is a header and is always skipped;
/// blank lines are ignored. Any malformed row fails the whole roster.
pub fn parse_roster(content: &str) -> Result<Roster> {
    let splitter = Regex::new(r"[,;\t]").expect("regex is valid");
    let mut roster = Roster::new();

    for (idx, raw_line) in content.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = splitter.split(line).collect();
        if fields.len() < 3 {
            return Err(TallyError::RosterFormat {
                line: line_no,
                reason: format!("expected at least 3 fields, found {}", fields.len()),
            });
        }

        let id: DeviceId = fields[0].parse().map_err(|_| TallyError::RosterFormat {
            line: line_no,
            reason: format!("device id {:?} is not hexadecimal", fields[0]),
        })?;

        if let Some(previous) = roster.insert(id, RosterEntry::new(fields[1], fields[2])) {
            warn!(
                "Roster line {}: device {} was already assigned to {} {}; using the later row",
                line_no, id, previous.first_name, previous.last_name
            );
        }
    }

    Ok(roster)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
