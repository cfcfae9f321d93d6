//! The fixed security-header table.
//!
//! Six entries, baked in at build time and never derived from any input.
//! `name` is the lowercase wire name used by header maps on both event
//! shapes; `key` is the canonical casing carried in the Lambda@Edge
//! `{key, value}` header records.

const PERMISSIONS_POLICY: &str = "accelerometer=(), camera=(), geolocation=(), gyroscope=(), magnetometer=(), microphone=(), payment=(), usb=()";
const REFERRER_POLICY: &str = "same-origin";
const STRICT_TRANSPORT_SECURITY: &str = "max-age=63072000; includeSubdomains; preload";
const X_CONTENT_TYPE_OPTIONS: &str = "nosniff";
const X_FRAME_OPTIONS: &str = "DENY";
const X_XSS_PROTECTION: &str = "1; mode=block";

/// One fixed response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityHeader {
    /// Lowercase wire name.
    pub name: &'static str,
    /// Canonical-case name.
    pub key: &'static str,
    /// Literal header value.
    pub value: &'static str,
}

/// The complete policy, in the order it is applied.
pub const SECURITY_HEADERS: [SecurityHeader; 6] = [
    SecurityHeader {
        name: "permissions-policy",
        key: "Permissions-Policy",
        value: PERMISSIONS_POLICY,
    },
    SecurityHeader {
        name: "referrer-policy",
        key: "Referrer-Policy",
        value: REFERRER_POLICY,
    },
    SecurityHeader {
        name: "strict-transport-security",
        key: "Strict-Transport-Security",
        value: STRICT_TRANSPORT_SECURITY,
    },
    SecurityHeader {
        name: "x-content-type-options",
        key: "X-Content-Type-Options",
        value: X_CONTENT_TYPE_OPTIONS,
    },
    SecurityHeader {
        name: "x-frame-options",
        key: "X-Frame-Options",
        value: X_FRAME_OPTIONS,
    },
    SecurityHeader {
        name: "x-xss-protection",
        key: "X-XSS-Protection",
        value: X_XSS_PROTECTION,
    },
];
