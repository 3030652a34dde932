//! Per-request context passed explicitly into log calls.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;
use tower_http::request_id::RequestId;
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Correlation data for one request.
///
/// The id comes from `X-Correlation-Id` (set by the request-id layer when the
/// client did not send one).
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: String,
}

impl RequestContext {
    fn from_parts(parts: &Parts) -> Self {
        let correlation_id = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .or_else(|| {
                parts
                    .headers
                    .get(&CORRELATION_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
            })
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self { correlation_id }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
