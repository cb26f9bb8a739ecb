//! Runtime orchestration layer for clicker tally.
//!
//! Sequences roster loading, archive extraction, tallying and
//! reconciliation, then renders the report to its destination.

pub mod output;
pub mod pipeline;

pub use tally_core as core;
pub use tally_data as data;
