//! Display labels for directory entries.

use std::collections::BTreeMap;

/// Fixed filename → label overrides, consulted before deriving a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    overrides: BTreeMap<String, String>,
}

impl LabelMap {
    /// An empty map: every label is derived from its filename.
    pub fn empty() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Add or replace an override.
    pub fn insert(&mut self, filename: impl Into<String>, label: impl Into<String>) {
        self.overrides.insert(filename.into(), label.into());
    }

    /// Label for `filename`: the override when one is set, else derived.
    ///
    /// An override that is an empty string counts as unset.
    pub fn label_for(&self, filename: &str) -> String {
        match self.overrides.get(filename) {
            Some(label) if !label.is_empty() => label.clone(),
            _ => derive_label(filename),
        }
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.insert("index.html", "Home");
        map
    }
}

/// Strip a trailing `.html` (any case) and upper-case the first character.
pub fn derive_label(filename: &str) -> String {
    let stem = strip_html_suffix(filename);

    let mut chars = stem.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn strip_html_suffix(filename: &str) -> &str {
    const SUFFIX: &str = ".html";

    let split = filename.len().saturating_sub(SUFFIX.len());
    match (filename.get(..split), filename.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(SUFFIX) => stem,
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(derive_label("about.html"), "About");
        assert_eq!(derive_label("contact-us.html"), "Contact-us");
    }

    #[test]
    fn leaves_rest_unchanged() {
        assert_eq!(derive_label("myPage.html"), "MyPage");
        assert_eq!(derive_label("FAQ.html"), "FAQ");
    }

    #[test]
    fn strips_suffix_case_insensitively() {
        assert_eq!(derive_label("notes.HTML"), "Notes");
        assert_eq!(derive_label("notes.Html"), "Notes");
    }

    #[test]
    fn bare_suffix_yields_empty_label() {
        assert_eq!(derive_label(".html"), "");
        assert_eq!(derive_label(""), "");
    }

    #[test]
    fn handles_multibyte_names() {
        assert_eq!(derive_label("über.html"), "Über");
        assert_eq!(derive_label("é"), "É");
    }

    #[test]
    fn default_map_labels_home() {
        let labels = LabelMap::default();

        assert_eq!(labels.label_for("index.html"), "Home");
        assert_eq!(labels.label_for("about.html"), "About");
    }

    #[test]
    fn empty_override_falls_back_to_derived() {
        let mut labels = LabelMap::empty();
        labels.insert("faq.html", "");

        assert_eq!(labels.label_for("faq.html"), "Faq");
    }
}
