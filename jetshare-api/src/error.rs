use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jetshare_offer::form::{FieldError, FormError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String, Vec<FieldError>),
    NotFoundError(String),
    ConflictError(String),
    UpstreamError(String),
    InternalServerError(String),
}

impl AppError {
    pub fn from_form(err: FormError) -> Self {
        match err {
            FormError::Invalid(fields) => {
                AppError::ValidationError(format!("Offer is invalid ({} field errors)", fields.len()), fields)
            }
            FormError::AlreadySubmitting => AppError::ConflictError(err.to_string()),
            FormError::UnknownSection(_) => AppError::ValidationError(err.to_string(), Vec::new()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, fields) = match self {
            AppError::ValidationError(msg, fields) => (StatusCode::BAD_REQUEST, msg, fields),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            AppError::UpstreamError(msg) => {
                tracing::warn!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, "Upstream layout service unavailable".to_string(), Vec::new())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string(), Vec::new())
            }
        };

        let body = if fields.is_empty() {
            Json(json!({ "error": error_message }))
        } else {
            Json(json!({ "error": error_message, "fields": fields }))
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_map_to_statuses() {
        let invalid = AppError::from_form(FormError::Invalid(Vec::new())).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let busy = AppError::from_form(FormError::AlreadySubmitting).into_response();
        assert_eq!(busy.status(), StatusCode::CONFLICT);

        let upstream = AppError::UpstreamError("timeout".into()).into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }
}
