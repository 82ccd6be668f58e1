use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use dnsjson_domain::{ErrorKind, TranscodeError};
use serde::Serialize;
use tracing::warn;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// DNS SERVFAIL, reported in every error body.
pub const RCODE_SERVER_FAILURE: u32 = 2;

#[derive(Serialize)]
struct DnsErrorBody<'a> {
    #[serde(rename = "Status")]
    status: u32,
    #[serde(rename = "Comment", skip_serializing_if = "str::is_empty")]
    comment: &'a str,
}

/// JSON error response: `{"Status": 2, "Comment": <comment>}` with the given
/// HTTP status.
pub fn format_error(comment: &str, status: StatusCode) -> Response {
    let body = DnsErrorBody {
        status: RCODE_SERVER_FAILURE,
        comment,
    };

    match serde_json::to_vec(&body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to encode DNS error body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub struct ApiError(pub TranscodeError);

impl From<TranscodeError> for ApiError {
    fn from(err: TranscodeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The client subnet comes from the caller's request; every other
        // failure means the JSON answer we were handed is unusable.
        let status = match self.0.kind() {
            ErrorKind::InvalidClientSubnet => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidName
            | ErrorKind::InvalidData
            | ErrorKind::UnknownType
            | ErrorKind::MalformedRecord
            | ErrorKind::RecordDecodeFailed => StatusCode::BAD_GATEWAY,
        };

        warn!(status = %status, error = %self.0, "Transcoding failed");
        format_error(&self.0.to_string(), status)
    }
}
