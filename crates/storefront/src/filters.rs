//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a cart badge count, capping large values.
///
/// Usage in templates: `{{ count|badge }}`
#[askama::filter_fn]
pub fn badge(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let text = count.to_string();
    Ok(match text.parse::<u64>() {
        Ok(n) if n > 99 => "99+".to_string(),
        _ => text,
    })
}
