use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{EngineError, LifecycleError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"error": self.message}))).into_response()
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        let status = match &err {
            LifecycleError::Validation(_) => StatusCode::BAD_REQUEST,
            LifecycleError::NotFound { .. } => StatusCode::NOT_FOUND,
            LifecycleError::Precondition(_) => StatusCode::CONFLICT,
            LifecycleError::Engine(EngineError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            LifecycleError::Engine(_) => StatusCode::BAD_GATEWAY,
            LifecycleError::Storage(inner) => {
                error!("Storage failure: {:#}", inner);
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal storage error".to_string(),
                };
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
