use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use llm::LlmError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `PAYLOAD_TOO_LARGE`, `AI_UNAVAILABLE`, `AI_FAILED`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Item name must be 1-256 characters")]
    pub error: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    PayloadTooLarge(String),
    /// No API key configured.
    AiUnavailable,
    /// The model call or its reply failed. Carries the client-facing message.
    AiFailed(String),
    Internal(String),
}

impl AppError {
    /// Fails with `Validation` when any required field is blank.
    pub fn require_fields(missing: Vec<&'static str>) -> Result<(), AppError> {
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    error: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    error: msg,
                },
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    error: msg,
                },
            ),
            AppError::AiUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    code: "AI_UNAVAILABLE",
                    error: "AI features are disabled".into(),
                },
            ),
            AppError::AiFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    code: "AI_FAILED",
                    error: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        error: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }

    /// Map a gateway failure, replacing upstream detail with `message`.
    ///
    /// Input problems stay validation errors so the client can fix them.
    pub fn from_llm(err: LlmError, message: &str) -> Self {
        match err {
            LlmError::InvalidInput(msg) => AppError::Validation(msg),
            LlmError::NotConfigured => AppError::AiUnavailable,
            other => {
                tracing::error!(error = %other, "{message}");
                AppError::AiFailed(message.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AppError::NotFound("Photo not found".into()),
            StorageError::InvalidKey(msg) => AppError::Validation(format!("Invalid photo key: {msg}")),
            StorageError::SizeLimitExceeded { limit, .. } => {
                AppError::PayloadTooLarge(format!("Photo exceeds maximum size of {limit} bytes"))
            }
            StorageError::Io(e) => AppError::Internal(format!("Storage I/O error: {e}")),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::from_llm(err, "AI request failed")
    }
}
