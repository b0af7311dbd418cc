//! CORS origin resolution.
//!
//! # Responsibilities
//! - Parse the configured comma-separated origin allow-list
//! - Resolve the `Access-Control-Allow-Origin` value for a request
//!
//! # Design Decisions
//! - Pure function of (request origin, allow-list config); no I/O
//! - Origins compare exactly: scheme, host and port must all match
//! - A recognized-but-denied origin resolves to the literal `"null"`,
//!   which browsers treat as a deny, not a missing header

/// Resolve the `Access-Control-Allow-Origin` value for a request.
///
/// A request without an `Origin` header is permissive (`"*"`), as is an
/// absent or empty allow-list. A wildcard entry anywhere in the list allows
/// every origin. Otherwise the origin is echoed back when listed, and
/// `"null"` is returned when it is not.
pub fn resolve_origin(origin: Option<&str>, allow_list: Option<&str>) -> String {
    let Some(origin) = origin else {
        return "*".to_string();
    };
    let Some(raw) = allow_list else {
        return "*".to_string();
    };

    let allowed: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    if allowed.is_empty() || allowed.contains(&"*") {
        return "*".to_string();
    }
    if allowed.contains(&origin) {
        return origin.to_string();
    }
    "null".to_string()
}
