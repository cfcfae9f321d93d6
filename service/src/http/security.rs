//! Security headers middleware for HTTP responses.
//!
//! This is the same fixed policy the edge hooks apply, expressed at the
//! tower/axum seam so the harness's own responses leave with the exact
//! headers a client would see from the CDN.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
    Extension,
};

use eh_policy::SECURITY_HEADERS;

/// Build the fixed security-header set.
///
/// Returns an `Arc`-wrapped `HeaderMap` that is built once at startup and
/// shared across requests via Axum's `Extension` layer. The values come
/// straight from the policy table; nothing here is configurable.
#[must_use]
pub fn security_headers() -> Arc<HeaderMap> {
    let mut headers = HeaderMap::new();
    for header in &SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(header.name),
            HeaderValue::from_static(header.value),
        );
    }
    Arc::new(headers)
}

/// Middleware to add the security headers to all responses.
///
/// Reads the pre-built `HeaderMap` from an `Extension` and inserts every
/// pair into the response, replacing same-named headers a handler may have
/// set. Add as the outermost layer so headers are applied to all routes.
pub async fn security_headers_middleware(
    Extension(headers): Extension<Arc<HeaderMap>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let response_headers = response.headers_mut();
    for (name, value) in headers.iter() {
        response_headers.insert(name.clone(), value.clone());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_set_matches_policy_table() {
        let headers = security_headers();

        assert_eq!(headers.len(), 6);
        for header in &SECURITY_HEADERS {
            assert_eq!(
                headers.get(header.name).map(|v| v.to_str().unwrap_or("")),
                Some(header.value)
            );
        }
    }

    #[test]
    fn test_exact_wire_values() {
        let headers = security_headers();

        assert_eq!(
            headers.get("strict-transport-security"),
            Some(&HeaderValue::from_static(
                "max-age=63072000; includeSubdomains; preload"
            ))
        );
        assert_eq!(
            headers.get("x-frame-options"),
            Some(&HeaderValue::from_static("DENY"))
        );
        assert_eq!(
            headers.get("x-xss-protection"),
            Some(&HeaderValue::from_static("1; mode=block"))
        );
    }
}
