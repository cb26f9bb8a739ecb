//! Report destinations.

use std::io::Write;
use std::path::PathBuf;

use tally_core::error::{Result, TallyError};
use tracing::info;

/// Where a finished report goes.
///
/// The report is always rendered in full before it is handed to a sink, so
/// a failed run never leaves partial output on standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSink {
    Stdout,
    File(PathBuf),
}

impl ReportSink {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => ReportSink::File(p),
            None => ReportSink::Stdout,
        }
    }

    /// Write the complete report.
    pub fn deliver(&self, report: &[u8]) -> Result<()> {
        match self {
            ReportSink::Stdout => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                lock.write_all(report)?;
                lock.flush()?;
            }
            ReportSink::File(path) => {
                std::fs::write(path, report).map_err(|source| TallyError::FileWrite {
                    path: path.clone(),
                    source,
                })?;
                info!("Wrote {} bytes to {}", report.len(), path.display());
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
