use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::llm::LlmError;
use crate::store::StoreError;

/// Errors returned by the HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The request body could not be read as the expected JSON.
    InvalidBody(StatusCode, String),
    Llm(LlmError),
    Storage(StoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(status, _) => *status,
            ApiError::Llm(LlmError::KeysExhausted { .. }) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Llm(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::NotFound(m) | ApiError::BadRequest(m) | ApiError::InvalidBody(_, m) => {
                m.clone()
            }
            ApiError::Llm(e) => e.to_string(),
            ApiError::Storage(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!("{}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.status(), rejection.body_text())
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::Llm(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Email not found".to_string()),
            other => ApiError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let exhausted = ApiError::from(LlmError::KeysExhausted { attempts: 2 });
        assert_eq!(exhausted.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let provider = ApiError::from(LlmError::Provider {
            status: 400,
            message: "bad".to_string(),
        });
        assert_eq!(provider.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing = ApiError::from(StoreError::NotFound("9".to_string()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.message(), "Email not found");
    }
}
