//! Link list rendering and placeholder substitution.

use std::borrow::Cow;

/// Separator placed between list items. Matches the indentation of the
/// stock directory template.
const ITEM_SEPARATOR: &str = "\n            ";

/// A single directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link target
    pub href: String,
    /// Display label
    pub label: String,
}

impl Link {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    fn render(&self) -> String {
        format!(
            r#"<li><a href="{}">{}</a></li>"#,
            escape_html(&self.href),
            escape_html(&self.label)
        )
    }
}

/// The ordered directory: home first, a separator, then the other pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkList {
    pub home: Link,
    pub pages: Vec<Link>,
}

impl LinkList {
    /// Render the list as the HTML fragment substituted into the template.
    pub fn render(&self) -> String {
        let mut html = self.home.render();
        html.push_str(ITEM_SEPARATOR);
        html.push_str("<hr>");
        html.push_str(ITEM_SEPARATOR);

        let items: Vec<String> = self.pages.iter().map(Link::render).collect();
        html.push_str(&items.join(ITEM_SEPARATOR));

        html
    }
}

/// Replace the first occurrence of `placeholder` in `template`.
///
/// Returns the new text and whether the placeholder was found. When it was
/// not, the template comes back unchanged.
pub fn substitute(template: &str, placeholder: &str, content: &str) -> (String, bool) {
    if placeholder.is_empty() || !template.contains(placeholder) {
        return (template.to_string(), false);
    }
    (template.replacen(placeholder, content, 1), true)
}

/// Escape the characters that would break out of an attribute or element.
fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_home_separator_and_pages() {
        let list = LinkList {
            home: Link::new("/index.html", "Home"),
            pages: vec![
                Link::new("/pages/about.html", "About"),
                Link::new("/pages/contact.html", "Contact"),
            ],
        };

        assert_eq!(
            list.render(),
            "<li><a href=\"/index.html\">Home</a></li>\n            <hr>\n            \
             <li><a href=\"/pages/about.html\">About</a></li>\n            \
             <li><a href=\"/pages/contact.html\">Contact</a></li>"
        );
    }

    #[test]
    fn renders_home_alone() {
        let list = LinkList {
            home: Link::new("/index.html", "Home"),
            pages: vec![],
        };

        assert_eq!(
            list.render(),
            "<li><a href=\"/index.html\">Home</a></li>\n            <hr>\n            "
        );
    }

    #[test]
    fn escapes_markup_in_labels() {
        let link = Link::new("/pages/q&a.html", "Q&a <draft>");

        assert_eq!(
            link.render(),
            r#"<li><a href="/pages/q&amp;a.html">Q&amp;a &lt;draft&gt;</a></li>"#
        );
    }

    #[test]
    fn substitutes_first_occurrence_only() {
        let (out, found) = substitute("<ul>X</ul><ol>X</ol>", "X", "<li>1</li>");

        assert!(found);
        assert_eq!(out, "<ul><li>1</li></ul><ol>X</ol>");
    }

    #[test]
    fn missing_placeholder_leaves_template_unchanged() {
        let (out, found) = substitute("<ul></ul>", "<!-- DIRECTORY_LIST_PLACEHOLDER -->", "x");

        assert!(!found);
        assert_eq!(out, "<ul></ul>");
    }

    #[test]
    fn replacement_text_is_literal() {
        let (out, _) = substitute("[P]", "[P]", "$& $1");

        assert_eq!(out, "$& $1");
    }
}
