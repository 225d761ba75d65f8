//! Navigation injection.

use crate::config::NavConfig;
use crate::error::NavError;
use crate::markup::Markup;
use crate::page::current_page;
use crate::source::FragmentSource;

/// A page with its navigation injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// The rewritten page
    pub html: String,

    /// Page identifier derived from the location path
    pub current_page: String,

    /// Number of links marked active
    pub active_links: usize,
}

/// Replaces the placeholder element of a page with the shared navigation.
pub struct NavInjector<S> {
    config: NavConfig,
    markup: Markup,
    source: S,
}

impl<S: FragmentSource> NavInjector<S> {
    /// Create a new injector.
    pub fn new(config: NavConfig, source: S) -> Result<Self, NavError> {
        let markup = Markup::new(&config)?;
        Ok(Self {
            config,
            markup,
            source,
        })
    }

    /// Fetch the fragment, then inject it into `page`.
    ///
    /// The fetch is the only suspension point; everything after it is
    /// synchronous.
    pub async fn inject(&self, page: &str, location_path: &str) -> Result<Injection, NavError> {
        let fragment = self
            .source
            .fetch(&self.config.fragment_url, location_path)
            .await?;

        self.apply(page, &fragment, location_path)
    }

    /// Inject an already fetched `fragment` into `page`.
    pub fn apply(
        &self,
        page: &str,
        fragment: &str,
        location_path: &str,
    ) -> Result<Injection, NavError> {
        let current = current_page(location_path, &self.config.home_page);

        let marked = self.markup.mark_active(fragment, current);
        let container = format!("<div>{}</div>", marked.html);

        let html = self
            .markup
            .replace_placeholder(page, &container)
            .ok_or_else(|| NavError::PlaceholderMissing(self.config.placeholder_id.clone()))?;

        tracing::debug!(
            "Injected navigation for {} ({} active)",
            current,
            marked.active
        );

        Ok(Injection {
            html,
            current_page: current.to_string(),
            active_links: marked.active,
        })
    }
}
