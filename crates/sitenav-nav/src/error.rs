use std::io;

/// Errors that can occur while injecting navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("Failed to fetch navigation fragment {url}: {source}")]
    FetchFailed { url: String, source: io::Error },

    #[error("Unsupported navigation fragment URL: {0}")]
    UnsupportedUrl(String),

    #[error("No <script id=\"{0}\"> placeholder in page")]
    PlaceholderMissing(String),

    #[error("Invalid navigation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to render client script: {0}")]
    Template(String),
}
