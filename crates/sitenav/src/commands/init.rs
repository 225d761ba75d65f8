//! Initialize sitenav in a site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minijinja::{context, Environment};
use sitenav_directory::DEFAULT_PLACEHOLDER;
use sitenav_nav::{client_script, CLIENT_SCRIPT_NAME};

use crate::config::{self, ConfigFile, Layout};

/// Run the init command.
pub fn run(config_path: &Path, layout: Layout, yes: bool) -> Result<()> {
    tracing::info!("Initializing sitenav ({} layout)...", layout.as_str());

    let base = config::base_dir(config_path);
    let mut settings = ConfigFile {
        layout,
        ..Default::default()
    }
    .into_settings(&base);
    // Nav links use the same prefix as directory links
    settings.nav.strip_prefix = settings.directory.link_prefix.clone();
    let directory = &settings.directory;

    let mut env = Environment::new();
    env.add_template("config", DEFAULT_CONFIG)?;
    env.add_template("template", DEFAULT_TEMPLATE)?;
    env.add_template("nav", DEFAULT_NAV)?;

    let config_text = env.get_template("config")?.render(context! {
        layout => layout.as_str(),
        strip_prefix => &settings.nav.strip_prefix,
    })?;
    write_file(config_path, &config_text, yes)?;

    write_file(&directory.exclude_list, DEFAULT_EXCLUSIONS, yes)?;

    let template_text = env.get_template("template")?.render(context! {
        placeholder => DEFAULT_PLACEHOLDER,
    })?;
    write_file(&directory.template, &template_text, yes)?;

    if !directory.pages_dir.exists() {
        fs::create_dir_all(&directory.pages_dir).with_context(|| {
            format!("Failed to create {}", directory.pages_dir.display())
        })?;
        tracing::info!("Created {}", directory.pages_dir.display());
    }

    let directory_href = format!(
        "{}{}",
        directory.link_prefix,
        directory
            .output
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("directory.html")
    );
    let nav_text = env.get_template("nav")?.render(context! {
        scope_class => &settings.nav.scope_class,
        home_href => &directory.home_href,
        directory_href => directory_href,
    })?;
    let nav_path = fragment_path(&settings.site_root, &settings.nav.fragment_url);
    write_file(&nav_path, &nav_text, yes)?;

    let script = client_script(&settings.nav)?;
    write_file(&settings.site_root.join(CLIENT_SCRIPT_NAME), &script, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'sitenav generate' to build the directory page.");

    Ok(())
}

/// Where the navigation fragment lives on disk for a root-relative URL.
fn fragment_path(site_root: &Path, fragment_url: &str) -> PathBuf {
    let name = fragment_url
        .rsplit('/')
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("nav.html");

    if fragment_url.starts_with('/') {
        site_root.join(fragment_url.trim_start_matches('/'))
    } else {
        site_root.join(name)
    }
}

/// Write `content` unless the file exists and `overwrite` is off.
fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# sitenav configuration

# "pages": pages live in pages/ and link as /pages/<file>
# "root":  pages live next to index.html and link as /<file>
layout = "{{ layout }}"

[directory]
# Filenames (case-insensitive) to leave out of the directory page
exclude_list = "directory_exclude.json"
template = "directory_template.html"

[directory.labels]
"index.html" = "Home"

[nav]
fragment_url = "/nav.html"
active_class = "nav_active"
strip_prefix = "{{ strip_prefix }}"

[serve]
port = 4000
"#;

const DEFAULT_EXCLUSIONS: &str = "[\n  \"directory.html\"\n]\n";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Directory</title>
</head>
<body>
  <script id="navbar" src="/nav.js"></script>
  <main>
    <h1>Directory</h1>
    <ul class="directory">
            {{ placeholder }}
    </ul>
  </main>
</body>
</html>
"#;

const DEFAULT_NAV: &str = r#"<ul class="{{ scope_class }}">
  <li><a href="{{ home_href }}">Home</a></li>
  <li><a href="{{ directory_href }}">Directory</a></li>
</ul>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use sitenav_directory::DirectoryGenerator;
    use sitenav_nav::{NavInjector, SiteFragments};
    use tempfile::tempdir;

    #[test]
    fn scaffolds_pages_layout() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");

        run(&config_path, Layout::Pages, false).unwrap();

        let config = fs::read_to_string(&config_path).unwrap();
        assert!(config.contains("layout = \"pages\""));
        assert!(temp.path().join("pages").is_dir());
        assert!(temp.path().join("nav.js").exists());

        let template = fs::read_to_string(temp.path().join("directory_template.html")).unwrap();
        assert!(template.contains(DEFAULT_PLACEHOLDER));

        let nav = fs::read_to_string(temp.path().join("nav.html")).unwrap();
        assert!(nav.contains(r#"<ul class="nav">"#));
        assert!(nav.contains(r#"<a href="/pages/directory.html">Directory</a>"#));
    }

    #[test]
    fn scaffold_generates_cleanly() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");
        run(&config_path, Layout::Pages, false).unwrap();
        fs::write(temp.path().join("pages/about.html"), "").unwrap();

        let settings = config::load(&config_path).unwrap();
        let report = DirectoryGenerator::new(settings.directory).generate().unwrap();

        assert!(report.placeholder_found);
        assert_eq!(report.pages, 1);
    }

    #[tokio::test]
    async fn scaffolded_nav_marks_directory_link() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");
        run(&config_path, Layout::Pages, false).unwrap();
        let settings = config::load(&config_path).unwrap();
        let report = DirectoryGenerator::new(settings.directory).generate().unwrap();
        let page = fs::read_to_string(report.output).unwrap();

        let injector =
            NavInjector::new(settings.nav, SiteFragments::new(&settings.site_root)).unwrap();
        let injection = injector
            .inject(&page, "/pages/directory.html")
            .await
            .unwrap();

        assert_eq!(injection.active_links, 1);
        assert!(injection
            .html
            .contains(r#"<a class="nav_active" href="/pages/directory.html">Directory</a>"#));
    }

    #[test]
    fn scaffolded_root_layout_strips_root_prefix() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");

        run(&config_path, Layout::Root, false).unwrap();

        let settings = config::load(&config_path).unwrap();
        assert_eq!(settings.nav.strip_prefix, "/");
        let nav = fs::read_to_string(temp.path().join("nav.html")).unwrap();
        assert!(nav.contains(r#"<a href="/directory.html">Directory</a>"#));
    }

    #[test]
    fn template_has_single_nav_placeholder() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");

        run(&config_path, Layout::Pages, false).unwrap();

        let template = fs::read_to_string(temp.path().join("directory_template.html")).unwrap();
        assert_eq!(template.matches("<script").count(), 1);
        assert!(template.contains(r#"<script id="navbar" src="/nav.js"></script>"#));
    }

    #[test]
    fn keeps_existing_files_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");
        fs::write(&config_path, "layout = \"root\"\n").unwrap();

        run(&config_path, Layout::Pages, false).unwrap();

        assert_eq!(
            fs::read_to_string(&config_path).unwrap(),
            "layout = \"root\"\n"
        );
    }

    #[test]
    fn overwrites_with_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("sitenav.toml");
        fs::write(&config_path, "layout = \"pages\"\n").unwrap();

        run(&config_path, Layout::Root, true).unwrap();

        assert!(fs::read_to_string(&config_path)
            .unwrap()
            .contains("layout = \"root\""));
    }

    #[test]
    fn fragment_path_follows_url() {
        let root = Path::new("/site");

        assert_eq!(fragment_path(root, "/nav.html"), PathBuf::from("/site/nav.html"));
        assert_eq!(
            fragment_path(root, "/partials/nav.html"),
            PathBuf::from("/site/partials/nav.html")
        );
        assert_eq!(fragment_path(root, "../nav.html"), PathBuf::from("/site/nav.html"));
    }
}
