//! Exclusion list loading.
//!
//! The list is a JSON array of filenames. Matching is case-insensitive, so
//! every name is lower-cased once at load time.

use std::fs;
use std::path::Path;

use crate::error::DirectoryError;

/// Filenames to leave out of the generated directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    /// Lower-cased names, in file order
    names: Vec<String>,
}

impl ExclusionList {
    /// Build a list from raw names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Read and parse the exclusion list file.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = fs::read_to_string(path).map_err(|e| DirectoryError::read(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse exclusion list content. `path` is only used for error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self, DirectoryError> {
        let names: Vec<String> =
            serde_json::from_str(content).map_err(|e| DirectoryError::InvalidExclusionList {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self::from_names(names))
    }

    /// Whether `filename` is excluded, ignoring case.
    pub fn is_excluded(&self, filename: &str) -> bool {
        let lowered = filename.to_lowercase();
        self.names.iter().any(|n| *n == lowered)
    }

    /// The lower-cased names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
