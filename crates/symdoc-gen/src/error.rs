//! Error types for the symdoc-gen crate.

use std::backtrace::Backtrace;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error type for documentation generation.
///
/// Only failures that abort a whole run or a whole module become a
/// `GenError`. Degradations inside a module (an unreadable fragment, a
/// failed demangle) are logged and worked around instead.
#[derive(Debug)]
pub struct GenError {
    kind: GenErrorKind,
    backtrace: Backtrace,
}

/// Internal error variants. Not exposed publicly; use `is_xxx()` methods instead.
#[derive(Debug)]
pub(crate) enum GenErrorKind {
    /// The input directory could not be enumerated.
    InputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse a symbol-graph document.
    Deserialization(serde_json::Error),
    /// I/O error while reading documents or writing output.
    Io(std::io::Error),
}

impl GenError {
    /// Creates an error from an error kind, capturing a backtrace.
    pub(crate) fn new(kind: GenErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates the fatal input-directory error.
    pub(crate) fn input_dir(path: &Path, source: std::io::Error) -> Self {
        Self::new(GenErrorKind::InputDir {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns true if the input directory could not be enumerated.
    pub fn is_input_dir(&self) -> bool {
        matches!(self.kind, GenErrorKind::InputDir { .. })
    }

    /// Returns true if this error is due to a document parse failure.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, GenErrorKind::Deserialization(_))
    }

    /// Returns true if this error is due to I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, GenErrorKind::Io(_))
    }

    /// One-line summary without the backtrace, for per-module reports.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }

    /// Returns the backtrace captured when this error was created.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for GenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenErrorKind::InputDir { path, source } => {
                write!(
                    f,
                    "failed to read input directory {}: {source}",
                    path.display()
                )
            }
            GenErrorKind::Deserialization(err) => {
                write!(f, "failed to parse symbol graph: {err}")
            }
            GenErrorKind::Io(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Summary of what happened.
        writeln!(f, "{}", self.kind)?;

        // Backtrace (will be empty unless RUST_BACKTRACE is set).
        write!(f, "{}", self.backtrace)
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            GenErrorKind::InputDir { source, .. } => Some(source),
            GenErrorKind::Deserialization(err) => Some(err),
            GenErrorKind::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> Self {
        Self::new(GenErrorKind::Io(err))
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(GenErrorKind::Deserialization(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn input_dir_classification() {
        let io_err = std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        );
        let err = GenError::input_dir(Path::new("/graphs"), io_err);

        assert!(err.is_input_dir());
        assert!(!err.is_deserialization());
        assert!(!err.is_io());

        assert!(err.to_string().contains("failed to read input directory"));
        assert!(err.to_string().contains("/graphs"));
        assert!(err.source().is_some());
    }

    #[test]
    fn deserialization_from() {
        let json_err =
            serde_json::from_str::<String>("not valid json").unwrap_err();
        let err = GenError::from(json_err);

        assert!(err.is_deserialization());
        assert!(!err.is_input_dir());
        assert!(!err.is_io());

        assert!(err.to_string().contains("failed to parse symbol graph"));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_from() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = GenError::from(io_err);

        assert!(err.is_io());
        assert!(!err.is_input_dir());
        assert!(!err.is_deserialization());

        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
    }

    /// `reason()` is the short form used in per-module reports; it must not
    /// drag the backtrace along.
    #[test]
    fn reason_is_single_line() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = GenError::from(io_err);

        assert_eq!(err.reason(), "I/O error: file not found");
        assert!(!err.reason().contains('\n'));
    }

    #[test]
    fn backtrace_captured() {
        let err =
            GenError::new(GenErrorKind::Io(std::io::Error::other("test")));
        // Just verify we can call backtrace() - the actual content depends
        // on RUST_BACKTRACE environment variable.
        let _ = err.backtrace();
    }
}
