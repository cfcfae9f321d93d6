use thiserror::Error;

/// Errors from parsing an edge event envelope.
///
/// Injection itself cannot fail; a document either parses into a well-formed
/// envelope or is rejected here before any header is touched.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed edge event: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("edge event contains no records")]
    NoRecords,
}
