//! Page discovery.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::DirectoryError;
use crate::exclusion::ExclusionList;

/// Pages found in the scan directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    /// HTML filenames that survived the exclusion list, in directory order
    pub pages: Vec<String>,

    /// HTML filenames that were dropped because the exclusion list names them
    pub excluded: Vec<String>,
}

/// Scan `dir` (non-recursively) for `.html` files not named by `exclusions`.
///
/// The `.html` suffix check is case-sensitive; the exclusion check is not.
pub fn scan_pages(dir: &Path, exclusions: &ExclusionList) -> Result<PageSet, DirectoryError> {
    if !dir.is_dir() {
        return Err(DirectoryError::NotFound(dir.to_path_buf()));
    }

    let mut set = PageSet::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Entries below the root (dangling symlinks, races with deletes)
            // are skipped; only the scan directory itself is fatal.
            Err(e) if e.depth() > 0 => {
                tracing::warn!(
                    "Skipping unreadable entry {}: {}",
                    e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    e
                );
                continue;
            }
            Err(e) => return Err(DirectoryError::read(dir, io::Error::from(e))),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(
                "Skipping non UTF-8 filename: {}",
                entry.path().display()
            );
            continue;
        };

        if !name.ends_with(".html") {
            continue;
        }

        if exclusions.is_excluded(name) {
            tracing::debug!("Excluding {}", name);
            set.excluded.push(name.to_string());
        } else {
            set.pages.push(name.to_string());
        }
    }

    Ok(set)
}
