//! Response envelope and error translation shared by every HTTP surface.
//!
//! Every endpoint answers with the same JSON shape: a success envelope carrying an
//! optional typed `metadata` payload, or an error envelope carrying an optional
//! field → messages map.

mod envelope;
mod error;
mod extract;
mod fields;

pub use envelope::{ApiResponse, EnvelopeStatus, ErrorBody, SuccessBody};
pub use error::{ApiError, ApiResult, INTERNAL_ERROR_MESSAGE, internal_error_response};
pub use extract::{Payload, QueryParams};
pub use fields::FieldErrors;
