//! Placeholder replacement and active-link marking.
//!
//! Only the handful of tags involved are recognised: the placeholder
//! `<script>`, `<ul>` open/close tags to find the navigation scope, and `<a>`
//! open tags inside it. Everything else passes through byte for byte.

use std::ops::Range;

use regex::Regex;

use crate::config::NavConfig;
use crate::page::is_current;

/// Compiled patterns for one [`NavConfig`].
#[derive(Debug, Clone)]
pub struct Markup {
    placeholder: Regex,
    list_tag: Regex,
    anchor_tag: Regex,
    href_attr: Regex,
    class_attr: Regex,
    scope_class: String,
    active_class: String,
    strip_prefix: String,
}

/// Fragment after active-link marking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marked {
    pub html: String,
    /// Number of links that received the active class
    pub active: usize,
}

impl Markup {
    pub fn new(config: &NavConfig) -> Result<Self, regex::Error> {
        let id = regex::escape(&config.placeholder_id);

        Ok(Self {
            placeholder: Regex::new(&format!(
                r#"(?is)<script\b[^>]*?\sid\s*=\s*(?:"{id}"|'{id}')[^>]*>.*?</script\s*>"#
            ))?,
            list_tag: Regex::new(r"(?i)<(/?)ul\b([^>]*)>")?,
            anchor_tag: Regex::new(r"(?i)<a\b([^>]*)>")?,
            href_attr: Regex::new(r#"(?i)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)?,
            class_attr: Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
            scope_class: config.scope_class.clone(),
            active_class: config.active_class.clone(),
            strip_prefix: config.strip_prefix.clone(),
        })
    }

    /// Replace the first placeholder element in `page` with `replacement`.
    ///
    /// Returns `None` when the page has no placeholder.
    pub fn replace_placeholder(&self, page: &str, replacement: &str) -> Option<String> {
        let found = self.placeholder.find(page)?;

        let mut html = String::with_capacity(page.len() + replacement.len());
        html.push_str(&page[..found.start()]);
        html.push_str(replacement);
        html.push_str(&page[found.end()..]);
        Some(html)
    }

    /// Add the active class to every scoped link that points at `current_page`.
    pub fn mark_active(&self, fragment: &str, current_page: &str) -> Marked {
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();

        for scope in self.scopes(fragment) {
            for caps in self.anchor_tag.captures_iter(&fragment[scope.clone()]) {
                let (Some(tag), Some(attrs)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };

                let Some(href) = self.attr_value(&self.href_attr, attrs.as_str()) else {
                    continue;
                };
                if !is_current(href, current_page, &self.strip_prefix) {
                    continue;
                }

                let start = scope.start + tag.start();
                let end = scope.start + tag.end();
                if let Some(rewritten) = self.add_active_class(&fragment[start..end]) {
                    edits.push((start..end, rewritten));
                } else {
                    // already marked
                    edits.push((start..end, fragment[start..end].to_string()));
                }
            }
        }

        let active = edits.len();
        let mut html = String::with_capacity(fragment.len() + active * 24);
        let mut cursor = 0;
        for (range, replacement) in edits {
            html.push_str(&fragment[cursor..range.start]);
            html.push_str(&replacement);
            cursor = range.end;
        }
        html.push_str(&fragment[cursor..]);

        Marked { html, active }
    }

    /// Byte ranges covering the contents of each outermost scoped `<ul>`.
    fn scopes(&self, fragment: &str) -> Vec<Range<usize>> {
        let mut scopes = Vec::new();
        let mut depth = 0usize;
        let mut open_scope: Option<(usize, usize)> = None;

        for caps in self.list_tag.captures_iter(fragment) {
            let Some(tag) = caps.get(0) else { continue };
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

            if closing {
                depth = depth.saturating_sub(1);
                if let Some((scope_depth, start)) = open_scope {
                    if depth == scope_depth {
                        scopes.push(start..tag.start());
                        open_scope = None;
                    }
                }
            } else {
                let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                if open_scope.is_none() && self.has_class(attrs, &self.scope_class) {
                    open_scope = Some((depth, tag.end()));
                }
                depth += 1;
            }
        }

        // unterminated list: scope runs to the end of the fragment
        if let Some((_, start)) = open_scope {
            scopes.push(start..fragment.len());
        }

        scopes
    }

    fn attr_value<'a>(&self, pattern: &Regex, attrs: &'a str) -> Option<&'a str> {
        let caps = pattern.captures(attrs)?;
        (1..caps.len())
            .filter_map(|i| caps.get(i))
            .map(|m| m.as_str())
            .next()
    }

    fn has_class(&self, attrs: &str, class: &str) -> bool {
        self.attr_value(&self.class_attr, attrs)
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    /// Rewrite an `<a ...>` tag with the active class, or `None` if it has it already.
    fn add_active_class(&self, tag: &str) -> Option<String> {
        if self.has_class(tag, &self.active_class) {
            return None;
        }

        if let Some(caps) = self.class_attr.captures(tag) {
            let value = caps.get(1).or_else(|| caps.get(2))?;
            let insert = if value.as_str().trim().is_empty() {
                self.active_class.clone()
            } else {
                format!(" {}", self.active_class)
            };
            let mut out = tag.to_string();
            out.insert_str(value.end(), &insert);
            return Some(out);
        }

        // "<a" is always the first two bytes of a matched anchor tag
        let mut out = tag.to_string();
        out.insert_str(2, &format!(r#" class="{}""#, self.active_class));
        Some(out)
    }
}
