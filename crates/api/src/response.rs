use crate::errors::{format_error, JSON_CONTENT_TYPE};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use dnsjson_domain::{JsonMessage, EXPIRES_FORMAT};
use tracing::warn;

/// A DoH JSON answer. Adds `Cache-Control` and `Expires` derived from the
/// message's minimum TTL when it has any records.
pub struct JsonReply(pub JsonMessage);

impl IntoResponse for JsonReply {
    fn into_response(self) -> Response {
        let bytes = match self.0.to_json_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode DNS JSON response");
                return format_error(
                    "Failed to encode DNS JSON response",
                    StatusCode::INTERNAL_SERVER_ERROR,
                );
            }
        };

        let mut response = ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response();
        let headers = response.headers_mut();

        if let Some(least_ttl) = self.0.ttl.least_ttl() {
            if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", least_ttl)) {
                headers.insert(header::CACHE_CONTROL, value);
            }
        }

        if let Some(expires) = self.0.ttl.earliest_expires.filter(|_| self.0.ttl.have_ttl) {
            if let Ok(value) = HeaderValue::from_str(&expires.format(EXPIRES_FORMAT).to_string()) {
                headers.insert(header::EXPIRES, value);
            }
        }

        response
    }
}
