//! Request payloads accepted by the JSON API and their conversion into
//! typed domain input.

pub mod businesses;
pub mod categories;
pub mod reviews;

/// Treats blank optional text as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
