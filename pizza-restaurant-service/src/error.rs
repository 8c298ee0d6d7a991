use axum::{http::StatusCode, response::Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Pizza or Restaurant not found.")]
    PizzaOrRestaurantNotFound,
    #[error("validation errors")]
    Validation,
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::RestaurantNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.to_string() }),
            ),
            ApiError::PizzaOrRestaurantNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "errors": [self.to_string()] }),
            ),
            ApiError::Validation => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": [self.to_string()] }),
            ),
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::Task(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
