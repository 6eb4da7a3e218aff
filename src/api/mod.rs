pub mod assistant;
pub mod config;
pub mod emails;
pub mod error;
pub mod prompts;
pub mod router;

use axum::extract::FromRequest;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::store::Email;

/// `axum::Json` whose rejections render as `{"error": "..."}` like every
/// other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{"success": true, "email": {...}}`
#[derive(Debug, Serialize)]
pub struct EmailAck {
    pub success: bool,
    pub email: Email,
}

impl EmailAck {
    pub fn new(email: Email) -> Self {
        Self {
            success: true,
            email,
        }
    }
}
