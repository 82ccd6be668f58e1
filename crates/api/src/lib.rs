pub mod errors;
pub mod response;

pub use errors::{format_error, ApiError, JSON_CONTENT_TYPE, RCODE_SERVER_FAILURE};
pub use response::JsonReply;
