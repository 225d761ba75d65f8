//! Errors raised while generating the directory page.

use std::io;
use std::path::{Path, PathBuf};

/// Broad classification used when reporting a failed run to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The exclusion list (or other configuration) is malformed.
    Configuration,
    /// A referenced input file or directory does not exist.
    NotFound,
    /// Anything else: permissions, I/O failures.
    Unexpected,
}

/// Errors that can occur during directory generation.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("{} is not correctly formatted: it must be a JSON array of strings ({message})", .path.display())]
    InvalidExclusionList { path: PathBuf, message: String },

    #[error("Output {} would overwrite the template", .0.display())]
    OutputIsTemplate(PathBuf),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadError { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError { path: PathBuf, source: io::Error },

    #[error("Failed to load collation data: {0}")]
    Collation(String),
}

impl DirectoryError {
    /// Classify the error for operator-facing diagnostics.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidExclusionList { .. } | Self::OutputIsTemplate(_) => {
                ErrorCategory::Configuration
            }
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::ReadError { .. } | Self::WriteError { .. } | Self::Collation(_) => {
                ErrorCategory::Unexpected
            }
        }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::ReadError {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::WriteError {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
