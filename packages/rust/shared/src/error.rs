//! Error types for mdcbuild.
//!
//! Library crates use [`MdcBuildError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all mdcbuild operations.
#[derive(Debug, thiserror::Error)]
pub enum MdcBuildError {
    /// A file pattern that could not be compiled for matching.
    #[error("invalid file pattern '{pattern}'")]
    Pattern { pattern: String },

    /// Filesystem I/O error. All filesystem failures land here regardless
    /// of kind; none are retried or recovered mid-pipeline.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdcBuildError>;

impl MdcBuildError {
    /// Create a pattern error for an uncompilable file pattern.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
