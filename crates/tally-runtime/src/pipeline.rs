//! End-to-end tally pipeline.
//!
//! Loads the roster, then for every archive in input order: extract, tally,
//! reconcile. The finished [`AggregateState`] is rendered in one piece and
//! handed to the configured [`ReportSink`].
//!
//! All extraction happens under a single scratch directory owned by
//! [`TallyPipeline::aggregate`]; it is removed when that call returns,
//! whether it succeeded or not.

use std::path::{Path, PathBuf};

use tally_core::error::{Result, TallyError};
use tally_core::models::AggregateState;
use tally_core::settings::OutputFormat;
use tally_data::extractor::SessionExtractor;
use tally_data::reconciler::reconcile;
use tally_data::roster::load_roster;
use tally_data::tallier::tally_session;
use tally_report::ReportFormatter;
use tracing::{debug, info, warn};

use crate::output::ReportSink;

const SCRATCH_PREFIX: &str = "clicker-tally-";

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything a run needs, already resolved to concrete paths.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Roster table.
    pub roster: PathBuf,
    /// Session archives, in the order they should appear in the report.
    pub archives: Vec<PathBuf>,
    pub format: OutputFormat,
    pub separator: String,
    /// Report file; `None` means standard output.
    pub output: Option<PathBuf>,
    /// Parent for the scratch directory; the system temp dir when `None`.
    pub scratch_parent: Option<PathBuf>,
}

/// Sequential roster × sessions pipeline.
pub struct TallyPipeline {
    config: PipelineConfig,
}

impl TallyPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Aggregate, render, and deliver the report.
    pub fn run(&self) -> Result<AggregateState> {
        let state = self.aggregate()?;

        let formatter = ReportFormatter::new(self.config.format, self.config.separator.clone());
        let mut report: Vec<u8> = Vec::new();
        formatter.write_report(&state, &mut report)?;

        ReportSink::from_path(self.config.output.clone()).deliver(&report)?;
        Ok(state)
    }

    /// Load the roster and fold every archive into it.
    pub fn aggregate(&self) -> Result<AggregateState> {
        if self.config.archives.is_empty() {
            return Err(TallyError::NoInputFiles(
                "no session archives selected".to_string(),
            ));
        }

        let roster = load_roster(&self.config.roster)?;
        info!(
            "Roster {} has {} devices",
            self.config.roster.display(),
            roster.len()
        );

        let scratch = self.create_scratch()?;
        let mut extractor = SessionExtractor::new(scratch.path());
        let mut state = AggregateState::new(roster);

        for archive in &self.config.archives {
            self.process_archive(archive, &mut extractor, &mut state)?;
        }

        // Dropping would clean up too, but close() reports failures.
        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!(
                "Failed to remove scratch directory {}: {}",
                scratch_path.display(),
                e
            );
        }

        info!(
            "Processed {} sessions; roster now has {} devices",
            state.sessions.len(),
            state.roster.len()
        );
        Ok(state)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn create_scratch(&self) -> Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let scratch = match &self.config.scratch_parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        debug!("Scratch directory: {}", scratch.path().display());
        Ok(scratch)
    }

    fn process_archive(
        &self,
        archive: &Path,
        extractor: &mut SessionExtractor,
        state: &mut AggregateState,
    ) -> Result<()> {
        let extracted = extractor.extract(archive)?;
        let result = tally_session(&extracted.descriptor)?;

        let added = reconcile(&mut state.roster, &result);
        if !added.is_empty() {
            info!(
                "{}: {} devices not on the roster",
                extracted.display_name,
                added.len()
            );
        }

        debug!(
            "{}: {} questions, {} responses",
            extracted.display_name,
            result.total_questions,
            result.total_responses()
        );
        state.push_session(extracted.display_name, result);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
