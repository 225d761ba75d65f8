//! Preview server for sitenav sites.
//!
//! Serves the site as static files and injects the shared navigation into
//! every HTML page at request time. Optionally watches the pages folder and
//! regenerates the directory page when pages come and go.

pub mod server;
pub mod watcher;

pub use server::{PreviewConfig, PreviewServer, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
