use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::{ErrorBody, FieldErrors};

pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred, please try again later";

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Invalid identifier")]
    InvalidId,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("Please correct the invalid fields")]
    Validation(FieldErrors),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::BadRequest(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(Arc::new(err.into()))
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(errors) => {
                ErrorBody::new(self.status(), self.to_string()).with_errors(errors.clone())
            }
            ApiError::Internal(_) => ErrorBody::new(self.status(), INTERNAL_ERROR_MESSAGE),
            _ => ErrorBody::new(self.status(), self.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(Arc::new(value))
    }
}

impl From<DbErr> for ApiError {
    fn from(value: DbErr) -> Self {
        Self::internal(value)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!(error = ?err, "unhandled failure while serving request");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

/// The opaque 500 envelope, for failures that never became an [`ApiError`].
pub fn internal_error_response() -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (status, Json(ErrorBody::new(status, INTERNAL_ERROR_MESSAGE))).into_response()
}
