//! Browser-side navigation script.
//!
//! Sites that are served as plain files (no preview server) inject the
//! navigation in the browser instead. The script is rendered from the same
//! [`NavConfig`] the server uses so both agree on URLs and class names.

use minijinja::{context, Environment};

use crate::config::NavConfig;
use crate::error::NavError;

/// Suggested filename when writing the script next to the site's pages.
pub const CLIENT_SCRIPT_NAME: &str = "nav.js";

/// Render `nav.js` for `config`.
pub fn client_script(config: &NavConfig) -> Result<String, NavError> {
    let mut env = Environment::new();
    env.add_template("nav_client", CLIENT_TEMPLATE)
        .map_err(|e| NavError::Template(e.to_string()))?;

    let tmpl = env
        .get_template("nav_client")
        .map_err(|e| NavError::Template(e.to_string()))?;

    tmpl.render(context! {
        fragment_url => &config.fragment_url,
        placeholder_id => &config.placeholder_id,
        scope_class => &config.scope_class,
        active_class => &config.active_class,
        strip_prefix => &config.strip_prefix,
        home_page => &config.home_page,
    })
    .map_err(|e| NavError::Template(e.to_string()))
}

// One awaited fetch, then synchronous DOM work. Failures are left unhandled:
// the placeholder simply stays in place.
const CLIENT_TEMPLATE: &str = r#"// Shared navigation injector (generated by sitenav)
(async function () {
  'use strict';

  const response = await fetch({{ fragment_url|tojson }});
  const text = await response.text();

  const placeholder = document.querySelector('script#' + CSS.escape({{ placeholder_id|tojson }}));
  const container = document.createElement('div');
  container.innerHTML = text;
  placeholder.parentNode.replaceChild(container, placeholder);

  const stripPrefix = {{ strip_prefix|tojson }};
  const normalize = (value) => {
    let v = value;
    if (stripPrefix && v.startsWith(stripPrefix)) {
      v = v.slice(stripPrefix.length);
    }
    return v.startsWith('/') ? v.slice(1) : v;
  };

  const currentPage = normalize(
    window.location.pathname.split('/').pop() || {{ home_page|tojson }}
  );

  const links = document.querySelectorAll('ul.' + CSS.escape({{ scope_class|tojson }}) + ' a');
  links.forEach((link) => {
    if (normalize(link.getAttribute('href') || '') === currentPage) {
      link.classList.add({{ active_class|tojson }});
    }
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_configured_values() {
        let js = client_script(&NavConfig::default()).unwrap();

        assert!(js.contains(r#"await fetch("/nav.html")"#));
        assert!(js.contains(r#"CSS.escape("navbar")"#));
        assert!(js.contains(r#"CSS.escape("nav")"#));
        assert!(js.contains(r#"link.classList.add("nav_active")"#));
        assert!(js.contains(r#"const stripPrefix = "/p/";"#));
        assert!(js.contains(r#"|| "index.html""#));
    }

    #[test]
    fn escapes_values_as_js_strings() {
        let config = NavConfig {
            fragment_url: "/nav.html?x=\"</script>".to_string(),
            ..Default::default()
        };

        let js = client_script(&config).unwrap();

        assert!(!js.contains("</script>"));
        assert!(js.contains(r#"x=\""#));
    }
}
