//! Report rendering.
//!
//! [`ReportFormatter`] turns an [`AggregateState`] into text on any
//! [`std::io::Write`]; where the text ends up is the caller's business.

use std::io::{self, Write};

use tally_core::models::{AggregateState, SessionFile};
use tally_core::settings::OutputFormat;

use crate::layout::ColumnLayout;

/// Renders the joined roster × session table in one of the output formats.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    format: OutputFormat,
    separator: String,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat, separator: impl Into<String>) -> Self {
        Self {
            format,
            separator: separator.into(),
        }
    }

    /// Write the full report for `state` to `out`.
    pub fn write_report(&self, state: &AggregateState, out: &mut dyn Write) -> io::Result<()> {
        match self.format {
            OutputFormat::Csv => {
                for session in &state.sessions {
                    self.write_csv_block(state, session, out)?;
                    writeln!(out)?;
                }
            }
            OutputFormat::Prettyprint => {
                let layout = ColumnLayout::for_roster(&state.roster, &self.separator);
                for session in &state.sessions {
                    self.write_pretty_block(state, session, &layout, out)?;
                    writeln!(out)?;
                }
            }
            OutputFormat::CsvAll => self.write_matrix(state, out)?,
        }
        Ok(())
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn write_csv_block(
        &self,
        state: &AggregateState,
        session: &SessionFile,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let sep = &self.separator;
        writeln!(out, "{}", session.display_name)?;
        writeln!(out, "total{}{}", sep, session.result.total_questions)?;
        for (id, entry) in state.roster.iter() {
            writeln!(
                out,
                "{}{sep}{}{sep}{}",
                entry.last_name,
                entry.first_name,
                session.result.count_for(id),
            )?;
        }
        Ok(())
    }

    fn write_pretty_block(
        &self,
        state: &AggregateState,
        session: &SessionFile,
        layout: &ColumnLayout,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "{}", session.display_name)?;
        for (id, entry) in state.roster.iter() {
            writeln!(
                out,
                "{}{}",
                layout.row_prefix(entry),
                session.result.count_for(id)
            )?;
        }
        writeln!(out, "{}", layout.footer(session.result.total_questions))
    }

    /// One header, one row per roster device, one totals row.
    fn write_matrix(&self, state: &AggregateState, out: &mut dyn Write) -> io::Result<()> {
        let sep = self.separator.as_str();

        let mut header = vec!["last".to_string(), "first".to_string()];
        header.extend(state.sessions.iter().map(|s| s.display_name.clone()));
        writeln!(out, "{}", header.join(sep))?;

        for (id, entry) in state.roster.iter() {
            let mut row = vec![entry.last_name.clone(), entry.first_name.clone()];
            row.extend(
                state
                    .sessions
                    .iter()
                    .map(|s| s.result.count_for(id).to_string()),
            );
            writeln!(out, "{}", row.join(sep))?;
        }

        let mut totals = vec!["total".to_string(), String::new()];
        totals.extend(
            state
                .sessions
                .iter()
                .map(|s| s.result.total_questions.to_string()),
        );
        writeln!(out, "{}", totals.join(sep))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
