//! Shared building blocks for the clicker tally workspace.
//!
//! Holds the error type, the command-line settings, and the data model
//! (device ids, roster, per-session tallies) passed between the stages.

pub mod error;
pub mod models;
pub mod settings;

pub use error::{Result, TallyError};
