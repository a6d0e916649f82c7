use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use investment_goals_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Request did not complete within {0} ms")]
    Timeout(u128),
}

/// Body of every error response.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[schema(example = 404)]
    pub status_code: u16,
    /// HTTP reason phrase
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "Investment goal with ID 9999 not found")]
    pub message: String,
}

impl ApiError {
    pub fn goal_not_found(id: i64) -> Self {
        ApiError::NotFound(format!("Investment goal with ID {} not found", id))
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(CoreError::Validation(_)) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, self.to_string()),
            ApiError::Core(CoreError::Database(_)) => {
                tracing::error!(error = %self, "Request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
