//! Presentation layer for clicker tally.
//!
//! Renders the reconciled roster and per-session counts as `csv`,
//! `prettyprint` or `csv-all` text.

pub mod formatter;
pub mod layout;

pub use formatter::ReportFormatter;
