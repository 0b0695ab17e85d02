//! HTTP error mapping.
//!
//! # Responsibilities
//! - Collect subsystem errors behind one handler-result type
//! - Map each variant to its status code (401/403/400/500)
//!
//! # Design Decisions
//! - Client errors echo the error message in the body; server errors are
//!   logged and reported generically by status

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::AuthError;
use crate::records::{RecordError, StoreError, UpdateError};

/// Request-level failures surfaced to clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl From<UpdateError> for AppError {
    fn from(e: UpdateError) -> Self {
        match e {
            UpdateError::Record(e) => AppError::Record(e),
            UpdateError::Store(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Auth(AuthError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            AppError::Auth(AuthError::Forbidden) => StatusCode::FORBIDDEN,
            AppError::Record(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            return (status, "internal error").into_response();
        }

        (status, self.to_string()).into_response()
    }
}
