use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::models::website::RequestValidationError;
use services::services::website_generator::WebsiteGeneratorError;
use thiserror::Error;
use utils::response::ApiResponse;

/// Shown to clients instead of upstream model errors.
pub const GENERATION_FAILED_MESSAGE: &str = "Code generation failed. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] RequestValidationError),
    #[error(transparent)]
    Generation(#[from] WebsiteGeneratorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Generation(e) => {
                tracing::error!(error = %e, "Website code generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERATION_FAILED_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(&message))).into_response()
    }
}
