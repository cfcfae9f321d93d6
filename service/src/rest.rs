//! REST handlers for the harness endpoints.
//!
//! Besides build metadata, this exposes the two edge hooks over HTTP: post
//! an event document and get back the response exactly as the CDN would
//! deliver it, so function changes can be exercised without a deploy.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Serialize, Serializer};

use eh_policy::{origin, viewer, EventError, OriginEvent, OriginResponse, ViewerEvent, ViewerResponse};

use crate::build_info::BuildInfoProvider;

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// URI reference identifying the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a bad-request response for a rejected event document.
    #[must_use]
    pub fn malformed_event(detail: &str) -> Self {
        Self {
            problem_type: "https://how.wtf/errors/malformed-event".to_string(),
            title: "Malformed Event".to_string(),
            status: StatusCode::BAD_REQUEST,
            detail: detail.to_string(),
            instance: None,
        }
    }
}

impl From<EventError> for ProblemDetails {
    fn from(err: EventError) -> Self {
        Self::malformed_event(&err.to_string())
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// `GET /api/v1/build-info` — resolved build metadata.
pub async fn build_info_handler(
    Extension(provider): Extension<BuildInfoProvider>,
) -> impl IntoResponse {
    Json(provider.build_info())
}

/// `POST /simulate/viewer-response` — run the viewer-response hook against
/// the posted event document and return the transformed response.
///
/// # Errors
/// Returns a 400 problem response if the document is not a well-formed
/// viewer event.
pub async fn simulate_viewer_response(
    body: String,
) -> Result<Json<ViewerResponse>, ProblemDetails> {
    let event = ViewerEvent::from_json(&body)?;
    Ok(Json(viewer::handler(event)))
}

/// `POST /simulate/origin-response` — run the origin-response hook against
/// the posted event document and return the transformed response.
///
/// # Errors
/// Returns a 400 problem response if the document is not a well-formed
/// origin event or carries no records.
pub async fn simulate_origin_response(
    body: String,
) -> Result<Json<OriginResponse>, ProblemDetails> {
    let event = OriginEvent::from_json(&body)?;
    Ok(Json(origin::handler(event)?))
}
