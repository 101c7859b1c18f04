use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub message: String,
    pub code: u16,
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: status.as_u16(),
            status: EnvelopeStatus::Error,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// A success envelope plus the HTTP bits that travel with it.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    location: Option<String>,
    body: SuccessBody<T>,
}

impl<T> ApiResponse<T> {
    fn build(status: StatusCode, message: impl Into<String>, metadata: Option<T>) -> Self {
        Self {
            status,
            location: None,
            body: SuccessBody {
                message: message.into(),
                code: status.as_u16(),
                status: EnvelopeStatus::Success,
                metadata,
            },
        }
    }

    pub fn ok(message: impl Into<String>, metadata: T) -> Self {
        Self::build(StatusCode::OK, message, Some(metadata))
    }

    /// 201 pointing at the freshly created resource.
    pub fn created(message: impl Into<String>, metadata: T, location: impl Into<String>) -> Self {
        let mut response = Self::build(StatusCode::CREATED, message, Some(metadata));
        response.location = Some(location.into());
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &SuccessBody<T> {
        &self.body
    }
}

impl ApiResponse<()> {
    /// 200 with a confirmation message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self::build(StatusCode::OK, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(location) = self.location {
            if let Ok(value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, value);
            }
        }
        response
    }
}
