//! Fetching the navigation fragment.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use crate::error::NavError;

/// Something that can produce the navigation fragment for a page.
pub trait FragmentSource: Send + Sync {
    /// Fetch `url` as seen from the page at `location_path`.
    fn fetch(
        &self,
        url: &str,
        location_path: &str,
    ) -> impl Future<Output = Result<String, NavError>> + Send;
}

/// Reads fragments from a site directory on disk.
///
/// Root-relative URLs (`/nav.html`) resolve against the site root; relative
/// URLs (`../nav.html`) resolve against the directory of the current page.
#[derive(Debug, Clone)]
pub struct SiteFragments {
    root: PathBuf,
}

impl SiteFragments {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a fragment URL to a file under the site root.
    pub fn resolve(&self, url: &str, location_path: &str) -> Result<PathBuf, NavError> {
        if url.contains("://") || url.starts_with("//") {
            return Err(NavError::UnsupportedUrl(url.to_string()));
        }

        let url = url.split(['?', '#']).next().unwrap_or("");

        let joined = if url.starts_with('/') {
            url.to_string()
        } else {
            let page_dir = location_path
                .rsplit_once('/')
                .map(|(dir, _)| dir)
                .unwrap_or("");
            format!("{}/{}", page_dir, url)
        };

        let mut relative = PathBuf::new();
        for component in Path::new(&joined).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::ParentDir => {
                    if !relative.pop() {
                        return Err(NavError::UnsupportedUrl(url.to_string()));
                    }
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }

        Ok(self.root.join(relative))
    }
}

impl FragmentSource for SiteFragments {
    async fn fetch(&self, url: &str, location_path: &str) -> Result<String, NavError> {
        let path = self.resolve(url, location_path)?;
        tracing::debug!("Fetching navigation fragment {}", path.display());

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| NavError::FetchFailed {
                url: url.to_string(),
                source,
            })
    }
}

/// A fixed fragment, whatever the URL.
#[derive(Debug, Clone)]
pub struct StaticFragment(pub String);

impl FragmentSource for StaticFragment {
    async fn fetch(&self, _url: &str, _location_path: &str) -> Result<String, NavError> {
        Ok(self.0.clone())
    }
}
