use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::constants::{INTERNAL_SERVER_ERROR_MESSAGE, VALIDATION_FAILED_MESSAGE};
use crate::shared::types::{ErrorResponse, FieldError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(e.to_string()),
                )
            }
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details(VALIDATION_FAILED_MESSAGE, details),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorResponse::new(msg))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let msg = if msg.is_empty() {
                    INTERNAL_SERVER_ERROR_MESSAGE.to_string()
                } else {
                    msg
                };
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_every_detail() {
        let response = AppError::Validation(vec![
            FieldError::new("name", "name is required"),
            FieldError::new("latitude", "latitude is required"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
        assert_eq!(body["details"][1]["field"], "latitude");
        assert_eq!(body["details"][1]["msg"], "latitude is required");
    }

    #[tokio::test]
    async fn test_database_error_carries_underlying_message() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], sqlx::Error::PoolTimedOut.to_string());
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_empty_internal_message_falls_back_to_generic() {
        let response = AppError::Internal(String::new()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_payload_too_large_status() {
        let response =
            AppError::PayloadTooLarge("length limit exceeded".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"], "length limit exceeded");
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let response = AppError::NotFound("Not found".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not found");
    }
}
