use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cardoctor_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
///
/// Caller errors get a JSON body. Store and server failures get a bare 500:
/// details go to the log, never to the client.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::Unauthenticated | AppError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id"),
            err => {
                tracing::error!(error = %err, "request failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
