use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::{ValidationError, ValidationErrors};

use content_core::error::AppError;
use content_core::validation;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Field types are checked by the validator, so a data error here means the
/// body itself is not a JSON object. Anything that is not JSON at all is a
/// bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "body",
                    ValidationError::new("type").with_message(e.body_text().into()),
                );
                Self(AppError::ValidationFailed(errors))
            }
            other => Self(AppError::InvalidRequest(other.body_text())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::ValidationFailed(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
            }
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            ErrorResponse {
                error: error_type.to_string(),
                message: "Internal server error".to_string(),
                errors: None,
            }
        } else {
            ErrorResponse {
                error: error_type.to_string(),
                message: self.0.to_string(),
                errors: match &self.0 {
                    AppError::ValidationFailed(errors) => Some(validation::field_messages(errors)),
                    _ => None,
                },
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
