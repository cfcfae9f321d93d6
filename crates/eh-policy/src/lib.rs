//! Fixed edge security-header policy for `how.wtf`
//!
//! This crate holds the header table injected into every response leaving
//! the CDN, together with typed models of the two edge event envelopes the
//! policy runs against: the CloudFront-Functions viewer-response shape and
//! the Lambda@Edge origin-response shape. Injection is pure and synchronous;
//! the only fallible step is parsing an envelope.

mod error;
pub use error::EventError;

mod table;
pub use table::{SecurityHeader, SECURITY_HEADERS};

pub mod origin;
pub mod viewer;

pub use origin::{MultiHeaderBag, OriginEvent, OriginHeader, OriginResponse};
pub use viewer::{HeaderBag, HeaderEntry, ViewerEvent, ViewerResponse};
