use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the clicker tally pipeline.
#[derive(Error, Debug)]
pub enum TallyError {
    /// A roster line could not be split into id / last / first, or its id is not hex.
    #[error("Malformed roster line {line}: {reason}")]
    RosterFormat { line: usize, reason: String },

    /// A session archive is not a usable zip container or lacks its descriptor.
    #[error("Bad session archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    /// The session descriptor XML could not be tallied.
    #[error("Failed to parse session {path}: {reason}")]
    SessionParse { path: PathBuf, reason: String },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be written to its destination.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A device id string is not a valid hexadecimal number.
    #[error("Invalid device id: {0:?}")]
    InvalidDeviceId(String),

    /// An interactive answer did not select anything usable.
    #[error("Invalid selection: {0}")]
    Selection(String),

    /// Discovery found no roster or no session files to work with.
    #[error("No input files: {0}")]
    NoInputFiles(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the tally crates.
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_roster_format() {
        let err = TallyError::RosterFormat {
            line: 4,
            reason: "expected at least 3 fields, found 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed roster line 4: expected at least 3 fields, found 2"
        );
    }

    #[test]
    fn test_error_display_archive() {
        let err = TallyError::Archive {
            path: PathBuf::from("week1.tpzx"),
            reason: "TTSession.xml not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("week1.tpzx"));
        assert!(msg.contains("TTSession.xml not found"));
    }

    #[test]
    fn test_error_display_session_parse() {
        let err = TallyError::SessionParse {
            path: PathBuf::from("/scratch/week1/TTSession.xml"),
            reason: "response without deviceid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse session /scratch/week1/TTSession.xml: response without deviceid"
        );
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TallyError::FileRead {
            path: PathBuf::from("roster.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("roster.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_invalid_device_id() {
        let err = TallyError::InvalidDeviceId("XYZ".to_string());
        assert_eq!(err.to_string(), "Invalid device id: \"XYZ\"");
    }

    #[test]
    fn test_error_display_selection() {
        let err = TallyError::Selection("7 is out of range 1-3".to_string());
        assert_eq!(err.to_string(), "Invalid selection: 7 is out of range 1-3");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TallyError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
