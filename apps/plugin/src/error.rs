use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Errors surfaced by the host shell
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_type = match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Internal(_) => "InternalError",
        };

        let response = ErrorResponse {
            error: ErrorDetail {
                error_type: error_type.to_string(),
                message: self.to_string(),
            },
        };

        HttpResponse::build(self.status_code()).json(response)
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single webhook delivery attempt
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("slack returned status {0}")]
    Status(u16),

    #[error("request to Slack timed out")]
    Timeout,

    #[error("connection to Slack failed: {0}")]
    Connect(reqwest::Error),

    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for SendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SendError::Timeout
        } else if e.is_connect() {
            SendError::Connect(e)
        } else {
            SendError::Request(e)
        }
    }
}

impl SendError {
    /// HTTP status returned by the webhook, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            SendError::Status(code) => Some(*code),
            _ => None,
        }
    }
}
