use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform error body returned by every failing request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Validation failed")]
    pub error: String,
    /// Present only for validation failures, one entry per failing rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "latitude")]
    pub field: String,
    #[schema(example = "latitude must be between -90 and 90")]
    pub msg: String,
}

/// Liveness endpoint body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub ok: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            msg: msg.into(),
        }
    }
}
