//! Error types for seqdoc.
//!
//! Library crates use [`SeqDocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all seqdoc operations.
#[derive(Debug, thiserror::Error)]
pub enum SeqDocError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The metadata producer failed to run, exited non-zero, or emitted
    /// output that does not decode as the expected JSON shape. Fatal to the
    /// whole batch; no document is written.
    #[error("producer error: {message}")]
    Producer { message: String },

    /// A module's documentation file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A module's document lacks the structure needed to place the
    /// annotation block (no title heading and no main content container).
    #[error("document for {module} has no <main> element to anchor into: {message}")]
    Structural { module: String, message: String },

    /// Writing the patched document back failed.
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SeqDocError>;

impl SeqDocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a producer error from any displayable message.
    pub fn producer(msg: impl Into<String>) -> Self {
        Self::Producer {
            message: msg.into(),
        }
    }

    /// Create a structural error for a module.
    pub fn structural(module: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Structural {
            module: module.into(),
            message: msg.into(),
        }
    }

    /// Wrap a read failure with the offending path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Wrap a write failure with the offending path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this error poisons the entire batch rather than one module.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Producer { .. } | Self::Config { .. })
    }
}
