//! Locale-aware filename ordering.
//!
//! Filenames are compared with the root-locale collation tables from
//! `icu_collator`, the same ordering a browser's `localeCompare` applies
//! when no locale is given.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::error::DirectoryError;

/// Root-locale collator for page filenames.
pub struct LocaleOrder {
    collator: Collator,
}

impl LocaleOrder {
    /// Load the root collation with default strength and punctuation handling.
    pub fn root() -> Result<Self, DirectoryError> {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| DirectoryError::Collation(e.to_string()))?;
        Ok(Self { collator })
    }

    /// Compare two filenames; code point order breaks collation ties so the
    /// ordering is total.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b).then_with(|| a.cmp(b))
    }

    /// Sort filenames in place.
    pub fn sort(&self, names: &mut [String]) {
        names.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        LocaleOrder::root().unwrap().sort(&mut v);
        v
    }

    #[test]
    fn ignores_case_at_first_level() {
        assert_eq!(
            sorted(&["zeta.html", "Contact.html", "about.html"]),
            ["about.html", "Contact.html", "zeta.html"]
        );
    }

    #[test]
    fn lower_case_before_upper_case_on_tie() {
        let order = LocaleOrder::root().unwrap();

        assert_eq!(order.compare("about.html", "About.html"), Ordering::Less);
        assert_eq!(order.compare("About.html", "about.html"), Ordering::Greater);
    }

    #[test]
    fn prefix_sorts_first() {
        let order = LocaleOrder::root().unwrap();

        assert_eq!(order.compare("faq.html", "faq2.html"), Ordering::Less);
        assert_eq!(order.compare("a.html", "ab.html"), Ordering::Less);
    }

    #[test]
    fn digits_before_letters() {
        assert_eq!(
            sorted(&["links.html", "2024.html", "blog.html"]),
            ["2024.html", "blog.html", "links.html"]
        );
    }

    #[test]
    fn accents_and_punctuation_follow_browser_order() {
        assert_eq!(
            sorted(&[
                "zeta.html",
                "école.html",
                "about.html",
                "about_us.html",
                "about-us.html",
            ]),
            [
                "about_us.html",
                "about-us.html",
                "about.html",
                "école.html",
                "zeta.html",
            ]
        );
    }

    #[test]
    fn equal_only_for_identical_strings() {
        let order = LocaleOrder::root().unwrap();

        assert_eq!(order.compare("about.html", "about.html"), Ordering::Equal);
        assert_ne!(order.compare("ABOUT.html", "About.html"), Ordering::Equal);
    }
}
