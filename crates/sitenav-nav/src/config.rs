//! Navigation injection settings.

/// Where the fragment comes from and how links are matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavConfig {
    /// URL of the shared navigation fragment; root-relative or page-relative
    pub fragment_url: String,

    /// `id` of the `<script>` element replaced by the fragment
    pub placeholder_id: String,

    /// Class of the `<ul>` whose links are candidates for the active marker
    pub scope_class: String,

    /// Class added to the link of the current page
    pub active_class: String,

    /// Path prefix removed from hrefs and the current page before comparing
    pub strip_prefix: String,

    /// Page assumed when the location path ends in `/`
    pub home_page: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            fragment_url: "/nav.html".to_string(),
            placeholder_id: "navbar".to_string(),
            scope_class: "nav".to_string(),
            active_class: "nav_active".to_string(),
            strip_prefix: "/p/".to_string(),
            home_page: "index.html".to_string(),
        }
    }
}
