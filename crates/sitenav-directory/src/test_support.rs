//! Fixture site shared by the generator tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::generator::DirectoryConfig;

pub(crate) const TEMPLATE: &str =
    "<ul>\n            <!-- DIRECTORY_LIST_PLACEHOLDER -->\n</ul>\n";

/// A temporary project laid out the way the `pages` layout expects.
pub(crate) struct Site {
    dir: TempDir,
}

impl Site {
    pub(crate) fn new(exclusions: &str, pages: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("directory_exclude.json"), exclusions).unwrap();
        fs::write(root.join("directory_template.html"), TEMPLATE).unwrap();
        fs::create_dir_all(root.join("pages")).unwrap();
        for page in pages {
            fs::write(root.join("pages").join(page), "<html></html>").unwrap();
        }

        Self { dir }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn config(&self) -> DirectoryConfig {
        DirectoryConfig::pages_layout().relative_to(self.root())
    }

    pub(crate) fn template_path(&self) -> PathBuf {
        self.root().join("directory_template.html")
    }

    pub(crate) fn output_path(&self) -> PathBuf {
        self.root().join("pages").join("directory.html")
    }

    pub(crate) fn output(&self) -> String {
        fs::read_to_string(self.output_path()).unwrap()
    }
}
