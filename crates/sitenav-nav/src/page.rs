//! Current-page resolution and href normalization.

/// The page identifier for a location path: its final segment, or
/// `home_page` when the path ends in `/`.
pub fn current_page<'a>(location_path: &'a str, home_page: &'a str) -> &'a str {
    match location_path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => home_page,
    }
}

/// Strip `prefix` (when present) and then a single leading `/`.
pub fn normalize<'a>(value: &'a str, prefix: &str) -> &'a str {
    let value = if prefix.is_empty() {
        value
    } else {
        value.strip_prefix(prefix).unwrap_or(value)
    };
    value.strip_prefix('/').unwrap_or(value)
}

/// Whether `href` points at `page` once both are normalized.
pub fn is_current(href: &str, page: &str, prefix: &str) -> bool {
    normalize(href, prefix) == normalize(page, prefix)
}
