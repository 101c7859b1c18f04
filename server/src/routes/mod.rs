pub mod departments;
pub mod employees;
pub mod positions;

use platform_api::ApiError;
use uuid::Uuid;

/// Path ids are taken as raw strings so a malformed one answers with the envelope.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidId)
}
