//! Error and warning types for dump runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a dump run.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Root argument does not name a directory.
    #[error("'{path}' is not a valid directory")]
    InvalidRoot { path: PathBuf },

    /// Permission denied while listing a directory.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Traversal failed mid-walk.
    #[error("Traversal failed at {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every entry under the root was excluded.
    #[error("No files found in {root}")]
    EmptyResult { root: PathBuf },

    /// Output document could not be created or written.
    #[error("Cannot write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DumpError {
    /// Create a traversal error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Traversal { path, source },
        }
    }

    /// Create an output error.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// True for the traversal family of errors.
    pub fn is_traversal(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. } | Self::Traversal { .. })
    }
}

/// Kind of recovered condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Ignore source exists but could not be read; no rules apply.
    IgnoreSourceUnreadable,
    /// Ignore source contains a rule that does not compile; no rules apply.
    IgnorePatternInvalid,
    /// A candidate file could not be read while rendering.
    FileReadError,
}

/// Non-fatal condition encountered during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the condition occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for an unreadable ignore source.
    pub fn ignore_unreadable(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Ignore file unreadable, no rules applied: {error}"),
            path,
            kind: WarningKind::IgnoreSourceUnreadable,
        }
    }

    /// Create a warning for an ignore rule that failed to compile.
    pub fn ignore_invalid(path: impl Into<PathBuf>, line: usize, reason: &str) -> Self {
        let path = path.into();
        Self {
            message: format!("Invalid ignore rule on line {line}, no rules applied: {reason}"),
            path,
            kind: WarningKind::IgnorePatternInvalid,
        }
    }

    /// Create a warning for a candidate that could not be read.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error: {error}"),
            path,
            kind: WarningKind::FileReadError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_error_io() {
        let err = DumpError::io(
            "/repo/locked",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, DumpError::PermissionDenied { .. }));
        assert!(err.is_traversal());

        let err = DumpError::io("/repo/x", std::io::Error::other("boom"));
        assert!(matches!(err, DumpError::Traversal { .. }));
    }

    #[test]
    fn test_error_messages_are_single_line() {
        let err = DumpError::InvalidRoot {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(err.to_string(), "'/nope' is not a valid directory");

        let err = DumpError::EmptyResult {
            root: PathBuf::from("/repo"),
        };
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn test_read_error_warning() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let warning = ScanWarning::read_error("a.go", &io);
        assert_eq!(warning.kind, WarningKind::FileReadError);
        assert!(warning.message.contains("gone"));
    }
}
