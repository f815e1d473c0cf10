//! Endpoint method/path validation and normalization.
//!
//! Every request built from caller-supplied input passes through here before
//! it reaches the HTTP client. The checks are deliberately conservative: a
//! path containing a literal `..` substring is rejected outright rather than
//! semantically resolved, even though the upstream HTTP library would not
//! resolve parent segments itself.

use crate::error::{ClientError, Result};
use reqwest::Method;

/// Prefix every API resource lives under.
pub const API_PREFIX: &str = "/api/v1/";

/// Auth endpoints sit outside the versioned API tree and are left untouched.
pub const AUTH_PREFIX: &str = "/auth/";

/// Parse a caller-supplied HTTP method, case-insensitively, against the set
/// the JobBOSS2 API accepts.
///
/// # Errors
///
/// Returns [`ClientError::InvalidMethod`] naming the rejected value for
/// anything outside {GET, POST, PUT, DELETE, PATCH}.
pub fn parse_method(method: &str) -> Result<Method> {
    match method.trim().to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        "PATCH" => Ok(Method::PATCH),
        _ => Err(ClientError::InvalidMethod(method.trim().to_string())),
    }
}

/// Normalize a caller-supplied endpoint into a sanitized absolute path.
///
/// - trims surrounding whitespace; an empty value is rejected
/// - rejects embedded URL schemes (`scheme://`) so a caller cannot redirect
///   the request to an arbitrary host
/// - rejects `..` and `\` anywhere in the path
/// - prefixes `/` when the path is relative
/// - prepends [`API_PREFIX`] unless the path already starts with it (or with
///   [`AUTH_PREFIX`])
///
/// # Errors
///
/// Returns [`ClientError::Endpoint`] describing the first failed check.
pub fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Endpoint("Endpoint is required".to_string()));
    }
    if trimmed.contains("://") {
        return Err(ClientError::Endpoint(
            "Endpoint must be a relative path".to_string(),
        ));
    }
    if trimmed.contains("..") || trimmed.contains('\\') {
        return Err(ClientError::Endpoint("Invalid endpoint path".to_string()));
    }

    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    if path.starts_with(API_PREFIX) || path.starts_with(AUTH_PREFIX) {
        Ok(path)
    } else {
        Ok(format!("{API_PREFIX}{}", path.trim_start_matches('/')))
    }
}

/// Percent-encode a single path segment (RFC 3986 unreserved set kept).
///
/// Resource keys supplied by tool handlers may contain `/`, spaces, etc.
/// Encoding them individually keeps a value like `"ORD/100 A"` a single
/// segment instead of injecting extra path components.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(segment.len());
    for &b in segment.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

fn is_unreserved(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_method_accepts_allowed_set_case_insensitively() {
        for m in ["get", "GET", " Post ", "put", "delete", "PaTcH"] {
            parse_method(m).expect("allowed method");
        }
    }

    #[test]
    fn parse_method_rejects_unknown_methods_naming_the_value() {
        let err = parse_method("TRACE").unwrap_err();
        assert_eq!(err.to_string(), "Invalid HTTP method: TRACE");
        assert!(parse_method("").is_err());
    }

    #[test]
    fn normalize_rejects_empty_endpoint() {
        let err = normalize_endpoint("   ").unwrap_err();
        assert_eq!(err.to_string(), "Endpoint is required");
    }

    #[test]
    fn normalize_rejects_embedded_schemes() {
        let err = normalize_endpoint("https://evil.example.com/api/v1/orders").unwrap_err();
        assert_eq!(err.to_string(), "Endpoint must be a relative path");
    }

    #[test]
    fn normalize_rejects_parent_segments_and_backslashes() {
        for bad in ["../orders", "orders/../customers", "orders\\..\\x", "a..b"] {
            let err = normalize_endpoint(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid endpoint path");
        }
    }

    #[test]
    fn normalize_prepends_api_prefix() {
        assert_eq!(normalize_endpoint("orders").unwrap(), "/api/v1/orders");
        assert_eq!(normalize_endpoint("/orders/123").unwrap(), "/api/v1/orders/123");
        assert_eq!(
            normalize_endpoint("  orders?x=1  ").unwrap(),
            "/api/v1/orders?x=1"
        );
    }

    #[test]
    fn normalize_keeps_recognized_prefixes_unchanged() {
        assert_eq!(
            normalize_endpoint("/api/v1/orders/123").unwrap(),
            "/api/v1/orders/123"
        );
        assert_eq!(normalize_endpoint("/auth/token").unwrap(), "/auth/token");
    }

    #[test]
    fn encode_segment_escapes_separators_and_spaces() {
        assert_eq!(encode_segment("ORD/100 A"), "ORD%2F100%20A");
        assert_eq!(encode_segment("plain-part_1.0~x"), "plain-part_1.0~x");
        assert_eq!(encode_segment("a&b=c"), "a%26b%3Dc");
    }
}
