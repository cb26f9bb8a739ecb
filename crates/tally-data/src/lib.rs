//! Data ingestion layer for clicker tally.
//!
//! Loads the class roster, unpacks session archives, counts responses per
//! device and folds unknown devices back into the roster.

pub mod discovery;
pub mod extractor;
pub mod reconciler;
pub mod roster;
pub mod tallier;

pub use tally_core as core;
