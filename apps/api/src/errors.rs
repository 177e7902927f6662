use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::dispatch::MissingInput;
use crate::document::extract::ExtractError;
use crate::llm_client::LlmError;

/// Every failure a request can end in. Kept distinct even where the user-facing
/// outcome is the same ("no result to show").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    ReadError,
    EmptyDocument,
    MissingInput,
    QuotaExceeded,
    ServiceError,
    UnknownError,
    ValidationError,
    PayloadTooLarge,
    InternalError,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorKind::ReadError => "READ_ERROR",
            ErrorKind::EmptyDocument => "EMPTY_DOCUMENT",
            ErrorKind::MissingInput => "MISSING_INPUT",
            ErrorKind::QuotaExceeded => "QUOTA_EXCEEDED",
            ErrorKind::ServiceError => "SERVICE_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    fn status(self) -> StatusCode {
        match self {
            ErrorKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorKind::ReadError | ErrorKind::EmptyDocument => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::MissingInput | ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::ServiceError => StatusCode::BAD_GATEWAY,
            ErrorKind::UnknownError | ErrorKind::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Missing input: {0}")]
    MissingInput(MissingInput),

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MissingInput> for AppError {
    fn from(missing: MissingInput) -> Self {
        AppError::MissingInput(missing)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Extract(ExtractError::UnsupportedFormat { .. }) => {
                ErrorKind::UnsupportedFormat
            }
            AppError::Extract(ExtractError::ReadError(_)) => ErrorKind::ReadError,
            AppError::Extract(ExtractError::EmptyDocument) => ErrorKind::EmptyDocument,
            AppError::MissingInput(_) => ErrorKind::MissingInput,
            AppError::Generation(LlmError::QuotaExceeded(_)) => ErrorKind::QuotaExceeded,
            AppError::Generation(LlmError::Service { .. }) => ErrorKind::ServiceError,
            AppError::Generation(LlmError::Unknown(_)) => ErrorKind::UnknownError,
            AppError::Validation(_) => ErrorKind::ValidationError,
            AppError::PayloadTooLarge(_) => ErrorKind::PayloadTooLarge,
            AppError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Extract(ExtractError::UnsupportedFormat { file_name }) => format!(
                "Unsupported file '{file_name}'. Please upload your resume as a PDF."
            ),
            AppError::Extract(ExtractError::ReadError(cause)) => {
                format!("Could not read the uploaded PDF: {cause}")
            }
            AppError::Extract(ExtractError::EmptyDocument) => {
                "No text could be extracted from the uploaded PDF. Please upload a text-based resume."
                    .to_string()
            }
            AppError::MissingInput(missing) => missing.user_message().to_string(),
            AppError::Generation(LlmError::QuotaExceeded(_)) => {
                "The service is temporarily unavailable due to high demand. Please try again after a few moments."
                    .to_string()
            }
            AppError::Generation(e @ LlmError::Service { .. }) => {
                format!("An error occurred with the AI service: {e}")
            }
            AppError::Generation(LlmError::Unknown(cause)) => {
                format!("An unexpected error occurred: {cause}")
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => {
                "The uploaded file is too large. Please upload a smaller PDF.".to_string()
            }
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match &self {
            AppError::Generation(e) => tracing::warn!("Generation failed: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::debug!("Request rejected: {other}"),
        }

        let body = Json(json!({
            "error": {
                "code": kind.code(),
                "message": self.user_message()
            }
        }));

        (kind.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_errors_map_to_distinct_kinds() {
        let unsupported: AppError = ExtractError::UnsupportedFormat {
            file_name: "cv.docx".to_string(),
        }
        .into();
        let unreadable: AppError = ExtractError::ReadError("bad xref".to_string()).into();
        let empty: AppError = ExtractError::EmptyDocument.into();

        assert_eq!(unsupported.kind(), ErrorKind::UnsupportedFormat);
        assert_eq!(unreadable.kind(), ErrorKind::ReadError);
        assert_eq!(empty.kind(), ErrorKind::EmptyDocument);
        assert!(unsupported.user_message().contains("cv.docx"));
        assert!(unreadable.user_message().contains("bad xref"));
    }

    #[test]
    fn test_quota_and_missing_input_stay_distinguishable() {
        let quota: AppError = LlmError::QuotaExceeded("RESOURCE_EXHAUSTED".to_string()).into();
        let missing: AppError = MissingInput::Resume.into();
        assert_ne!(quota.kind(), missing.kind());
        assert_eq!(quota.kind().code(), "QUOTA_EXCEEDED");
        assert_eq!(missing.kind().code(), "MISSING_INPUT");
    }

    #[test]
    fn test_quota_message_asks_to_retry_later() {
        let err: AppError = LlmError::QuotaExceeded("quota".to_string()).into();
        assert!(err.user_message().contains("try again after a few moments"));
    }

    #[test]
    fn test_service_and_unknown_messages_carry_cause() {
        let service: AppError = LlmError::Service {
            status: 400,
            message: "API key not valid".to_string(),
        }
        .into();
        let unknown: AppError = LlmError::Unknown("connection reset".to_string()).into();

        assert_eq!(service.kind(), ErrorKind::ServiceError);
        assert!(service.user_message().starts_with("An error occurred with the AI service"));
        assert!(service.user_message().contains("API key not valid"));
        assert_eq!(unknown.kind(), ErrorKind::UnknownError);
        assert!(unknown.user_message().contains("connection reset"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::UnsupportedFormat.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(ErrorKind::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::QuotaExceeded.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ErrorKind::ServiceError.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorKind::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_internal_message_hides_details() {
        let err = AppError::Internal(anyhow::anyhow!("secret stack detail"));
        assert!(!err.user_message().contains("secret"));
    }
}
