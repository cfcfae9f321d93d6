//! HTTP utilities and middleware.
//!
//! This module provides shared HTTP functionality used by the harness server.

pub mod security;

pub use security::{security_headers, security_headers_middleware};
