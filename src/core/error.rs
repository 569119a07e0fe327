use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::field::FieldKind;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Invalid {kind} value: '{value}'")]
    InvalidFormat { kind: FieldKind, value: String },

    #[error("Incorrect birthday: {0}")]
    InvalidBirthday(String),

    #[error("Snapshot '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Corrupt snapshot '{}': {reason}", path.display())]
    CorruptSnapshot { path: PathBuf, reason: String },

    #[error("Snapshot version {found} is newer than supported version {supported}")]
    UnsupportedSnapshotVersion { found: u32, supported: u32 },

    #[error("I/O error on '{}': {source}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BookError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptSnapshot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// True for the one error the load path is allowed to recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, BookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_names_kind_and_value() {
        let err = BookError::InvalidFormat {
            kind: FieldKind::Phone,
            value: "12ab".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid phone value: '12ab'");
    }

    #[test]
    fn test_only_file_not_found_is_recoverable() {
        assert!(BookError::FileNotFound(PathBuf::from("book.snapshot")).is_not_found());
        assert!(!BookError::corrupt("book.snapshot", "truncated").is_not_found());
        let io_err = BookError::io(
            "book.snapshot",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!io_err.is_not_found());
    }

    #[test]
    fn test_io_failure_keeps_source() {
        use std::error::Error as _;

        let err = BookError::io("/readonly/book", io::Error::other("disk full"));
        assert!(err.to_string().contains("/readonly/book"));
        assert!(err.source().is_some());
    }
}
