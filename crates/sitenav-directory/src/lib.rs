//! Directory page generator for static HTML sites.
//!
//! Scans a folder for `.html` pages, drops the ones named in a JSON exclusion
//! list, and substitutes an ordered link list into a template.

pub mod collate;
pub mod error;
pub mod exclusion;
pub mod generator;
pub mod labels;
pub mod render;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{DirectoryError, ErrorCategory};
pub use exclusion::ExclusionList;
pub use generator::{DirectoryConfig, DirectoryGenerator, GenerateReport, DEFAULT_PLACEHOLDER};
pub use labels::LabelMap;
pub use render::{Link, LinkList};
