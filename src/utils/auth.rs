use axum::http::HeaderMap;
use std::collections::HashMap;

/// Header carrying the retrieval password. Header-name matching is
/// case-insensitive.
pub const PASSWORD_HEADER: &str = "x-submissions-password";
/// Query-parameter fallback for clients that cannot set headers.
pub const PASSWORD_PARAM: &str = "password";

/// Pull the provided secret from the header or, failing that, the
/// `password` query parameter.
pub fn provided_password(
    headers: &HeaderMap,
    params: &HashMap<String, String>,
) -> Option<String> {
    headers
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| params.get(PASSWORD_PARAM).cloned())
}

/// Plain string comparison against the configured secret. An unset secret
/// fails closed: nothing is ever authorized.
pub fn is_authorized(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) => expected == provided,
        _ => false,
    }
}
