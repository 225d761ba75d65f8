//! Shared navigation injection for static HTML sites.
//!
//! Replaces a `<script id="navbar">` placeholder with a navigation fragment
//! and marks the link of the current page with an active class. The same
//! settings also render the browser-side script for sites served as plain
//! files.

pub mod client;
pub mod config;
pub mod error;
pub mod injector;
pub mod markup;
pub mod page;
pub mod source;

pub use client::{client_script, CLIENT_SCRIPT_NAME};
pub use config::NavConfig;
pub use error::NavError;
pub use injector::{Injection, NavInjector};
pub use page::{current_page, normalize};
pub use source::{FragmentSource, SiteFragments, StaticFragment};
