//! Configuration file (sitenav.toml) loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sitenav_directory::{DirectoryConfig, LabelMap};
use sitenav_nav::NavConfig;

/// Deployment layout preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Pages live in `pages/` and link as `/pages/<file>`
    #[default]
    Pages,
    /// Pages live next to `index.html` and link as `/<file>`
    Root,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Root => "root",
        }
    }
}

/// Configuration file structure (sitenav.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub directory: DirectorySection,
    #[serde(default)]
    pub nav: NavSection,
    #[serde(default)]
    pub serve: ServeSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct DirectorySection {
    exclude_list: Option<PathBuf>,
    template: Option<PathBuf>,
    pages_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    link_prefix: Option<String>,
    home_page: Option<String>,
    home_href: Option<String>,
    placeholder: Option<String>,
    /// Merged over the built-in `index.html` → `Home`
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NavSection {
    fragment_url: Option<String>,
    placeholder_id: Option<String>,
    scope_class: Option<String>,
    active_class: Option<String>,
    strip_prefix: Option<String>,
    home_page: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ServeSection {
    root: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
}

/// Fully resolved settings shared by all commands.
#[derive(Debug, Clone)]
pub struct Settings {
    pub layout: Layout,
    pub directory: DirectoryConfig,
    pub nav: NavConfig,
    pub site_root: PathBuf,
    pub port: u16,
    pub host: String,
}

impl ConfigFile {
    /// Apply the file over the layout defaults, resolving paths against `base`.
    pub fn into_settings(self, base: &Path) -> Settings {
        let mut directory = match self.layout {
            Layout::Pages => DirectoryConfig::pages_layout(),
            Layout::Root => DirectoryConfig::root_layout(),
        };

        let d = self.directory;
        if let Some(v) = d.exclude_list {
            directory.exclude_list = v;
        }
        if let Some(v) = d.template {
            directory.template = v;
        }
        if let Some(v) = d.pages_dir {
            directory.pages_dir = v;
        }
        if let Some(v) = d.output {
            directory.output = v;
        }
        if let Some(v) = d.link_prefix {
            directory.link_prefix = v;
        }
        if let Some(v) = d.home_page {
            directory.home_page = v;
        }
        if let Some(v) = d.home_href {
            directory.home_href = v;
        }
        if let Some(v) = d.placeholder {
            directory.placeholder = v;
        }
        let mut labels = LabelMap::default();
        for (file, label) in d.labels {
            labels.insert(file, label);
        }
        directory.labels = labels;

        let defaults = NavConfig::default();
        let n = self.nav;
        let nav = NavConfig {
            fragment_url: n.fragment_url.unwrap_or(defaults.fragment_url),
            placeholder_id: n.placeholder_id.unwrap_or(defaults.placeholder_id),
            scope_class: n.scope_class.unwrap_or(defaults.scope_class),
            active_class: n.active_class.unwrap_or(defaults.active_class),
            strip_prefix: n.strip_prefix.unwrap_or(defaults.strip_prefix),
            home_page: n.home_page.unwrap_or(defaults.home_page),
        };

        let site_root = self.serve.root.unwrap_or_else(|| PathBuf::from("."));
        let site_root = if site_root.is_relative() {
            base.join(site_root)
        } else {
            site_root
        };

        Settings {
            layout: self.layout,
            directory: directory.relative_to(base),
            nav,
            site_root,
            port: self.serve.port.unwrap_or(4000),
            host: self.serve.host.unwrap_or_else(|| "127.0.0.1".to_string()),
        }
    }
}

/// Parse configuration text.
pub fn parse(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Load settings from `path`, falling back to defaults when it does not exist.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<Settings> {
    let base = base_dir(path);

    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default().into_settings(&base));
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(file.into_settings(&base))
}

/// Directory that relative paths in the config file are resolved against.
pub fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
