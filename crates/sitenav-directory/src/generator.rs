//! Directory page generator.

use std::fs;
use std::path::{Path, PathBuf};

use crate::collate::LocaleOrder;
use crate::error::DirectoryError;
use crate::exclusion::ExclusionList;
use crate::labels::LabelMap;
use crate::render::{substitute, Link, LinkList};
use crate::scan::scan_pages;

/// Marker in the template replaced by the rendered list.
pub const DEFAULT_PLACEHOLDER: &str = "<!-- DIRECTORY_LIST_PLACEHOLDER -->";

/// Configuration for generating a directory page.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// JSON array of filenames to leave out
    pub exclude_list: PathBuf,

    /// Template containing the placeholder; never written
    pub template: PathBuf,

    /// Directory scanned for `.html` files
    pub pages_dir: PathBuf,

    /// Generated page, overwritten on every run
    pub output: PathBuf,

    /// Prefix joined with each filename to form its href
    pub link_prefix: String,

    /// Filename of the home page, always listed first
    pub home_page: String,

    /// Link target of the home entry
    pub home_href: String,

    /// Marker replaced in the template
    pub placeholder: String,

    /// Label overrides
    pub labels: LabelMap,
}

impl DirectoryConfig {
    /// Pages live in `pages/` and link as `/pages/<file>`.
    pub fn pages_layout() -> Self {
        Self {
            exclude_list: PathBuf::from("directory_exclude.json"),
            template: PathBuf::from("directory_template.html"),
            pages_dir: PathBuf::from("pages"),
            output: PathBuf::from("pages/directory.html"),
            link_prefix: "/pages/".to_string(),
            home_page: "index.html".to_string(),
            home_href: "/index.html".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            labels: LabelMap::default(),
        }
    }

    /// Pages live in the project root and link as `/<file>`.
    pub fn root_layout() -> Self {
        Self {
            pages_dir: PathBuf::from("."),
            output: PathBuf::from("directory.html"),
            link_prefix: "/".to_string(),
            ..Self::pages_layout()
        }
    }

    /// Resolve relative paths against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [
            &mut self.exclude_list,
            &mut self.template,
            &mut self.pages_dir,
            &mut self.output,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::pages_layout()
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// File that was written
    pub output: PathBuf,

    /// Number of non-home pages listed
    pub pages: usize,

    /// Scanned files that the exclusion list removed
    pub excluded: Vec<String>,

    /// Whether the template contained the placeholder
    pub placeholder_found: bool,
}

/// Builds the directory page from a template and a folder of pages.
pub struct DirectoryGenerator {
    config: DirectoryConfig,
}

impl DirectoryGenerator {
    /// Create a new generator.
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    /// Run the generator once.
    ///
    /// Every input is read and the full page is rendered before the output is
    /// touched; a failure at any step leaves the previous output in place.
    pub fn generate(&self) -> Result<GenerateReport, DirectoryError> {
        let config = &self.config;

        tracing::info!(
            "Reading exclusion list from {}",
            config.exclude_list.display()
        );
        let exclusions = ExclusionList::load(&config.exclude_list)?;
        if exclusions.is_empty() {
            tracing::info!("No pages excluded");
        } else {
            tracing::info!("Ignoring pages: {}", exclusions.names().join(", "));
        }

        tracing::info!("Scanning {} for HTML files", config.pages_dir.display());
        let page_set = scan_pages(&config.pages_dir, &exclusions)?;

        let links = self.build_links(page_set.pages)?;
        let list_html = links.render();

        tracing::info!("Reading template from {}", config.template.display());
        let template = fs::read_to_string(&config.template)
            .map_err(|e| DirectoryError::read(&config.template, e))?;

        let (html, placeholder_found) = substitute(&template, &config.placeholder, &list_html);
        if !placeholder_found {
            tracing::warn!(
                "Template {} has no {} marker; writing it unchanged",
                config.template.display(),
                config.placeholder
            );
        }

        self.ensure_output_is_not_template()?;

        tracing::info!("Writing directory to {}", config.output.display());
        write_replacing(&config.output, &html)?;

        Ok(GenerateReport {
            output: config.output.clone(),
            pages: links.pages.len(),
            excluded: page_set.excluded,
            placeholder_found,
        })
    }

    /// Order the scanned pages into the directory link list.
    ///
    /// The home entry is always present, whether or not it was scanned or
    /// excluded.
    pub fn build_links(&self, pages: Vec<String>) -> Result<LinkList, DirectoryError> {
        let config = &self.config;

        let mut others: Vec<String> = pages
            .into_iter()
            .filter(|name| *name != config.home_page)
            .collect();
        LocaleOrder::root()?.sort(&mut others);

        Ok(LinkList {
            home: Link::new(
                config.home_href.clone(),
                config.labels.label_for(&config.home_page),
            ),
            pages: others
                .iter()
                .map(|name| {
                    Link::new(
                        format!("{}{}", config.link_prefix, name),
                        config.labels.label_for(name),
                    )
                })
                .collect(),
        })
    }

    fn ensure_output_is_not_template(&self) -> Result<(), DirectoryError> {
        let config = &self.config;
        if !config.output.exists() {
            return Ok(());
        }

        let template = fs::canonicalize(&config.template)
            .map_err(|e| DirectoryError::read(&config.template, e))?;
        let output = fs::canonicalize(&config.output)
            .map_err(|e| DirectoryError::read(&config.output, e))?;

        if template == output {
            return Err(DirectoryError::OutputIsTemplate(config.output.clone()));
        }
        Ok(())
    }
}

/// Write through a sibling temporary file so readers never see a half-written page.
fn write_replacing(path: &Path, content: &str) -> Result<(), DirectoryError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "directory.html".to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, content).map_err(|e| DirectoryError::write(path, e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(DirectoryError::write(path, e));
    }

    Ok(())
}
