use axum::{extract::State, Json};

use crate::api::error::ApiError;
use crate::api::JsonBody;
use crate::api::Ack;
use crate::store::PromptSet;
use crate::AppState;

/// GET /api/prompts
pub async fn get_prompts(State(state): State<AppState>) -> Result<Json<PromptSet>, ApiError> {
    Ok(Json(state.prompts.load().await?))
}

/// POST /api/prompts — replace all three templates
pub async fn update_prompts(
    State(state): State<AppState>,
    JsonBody(prompts): JsonBody<PromptSet>,
) -> Result<Json<Ack>, ApiError> {
    state.prompts.save(&prompts).await?;
    tracing::info!("Prompt templates updated");
    Ok(Json(Ack::ok()))
}
