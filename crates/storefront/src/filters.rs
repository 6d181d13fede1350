//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

fn pluralize_items(count: impl Display) -> String {
    let count = count.to_string();
    let noun = if count == "1" { "item" } else { "items" };
    format!("{count} {noun}")
}

/// Renders an item count with its noun, e.g. "1 item" or "3 items".
///
/// Usage in templates: `{{ cart.item_count|item_count_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn item_count_label(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(pluralize_items(count))
}

/// Returns the current year, for the footer copyright line.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the build-time content hash of main.css, for cache busting.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

#[cfg(test)]
mod tests {
    use super::pluralize_items;

    #[test]
    fn test_pluralize_items() {
        assert_eq!(pluralize_items(1), "1 item");
        assert_eq!(pluralize_items(0), "0 items");
        assert_eq!(pluralize_items(3), "3 items");
    }
}
