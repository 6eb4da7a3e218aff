use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::JsonBody;
use crate::api::Ack;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyUpdate {
    #[serde(default)]
    pub new_api_key: Option<String>,
}

/// POST /api/config — put a new API key at the front of the rotation
pub async fn update_api_key(
    State(state): State<AppState>,
    JsonBody(update): JsonBody<ApiKeyUpdate>,
) -> Result<Json<Ack>, ApiError> {
    let key = update
        .new_api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("API Key is required".to_string()))?;

    let pool = state.assistant.invoker().pool();
    pool.push_front(key);

    tracing::info!("API key added to rotation ({} keys)", pool.len());
    Ok(Json(Ack::ok()))
}
