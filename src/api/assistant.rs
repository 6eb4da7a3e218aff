use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::JsonBody;
use crate::api::EmailAck;
use crate::assistant::ChatContext;
use crate::store::{inbox, Draft};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPayload {
    pub email_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub message: String,
    pub context_email_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDraftPayload {
    pub email_id: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftReply {
    pub draft: Draft,
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty())
}

/// POST /api/process — categorize one email and extract its action items
pub async fn process_email(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ProcessPayload>,
) -> Result<Json<EmailAck>, ApiError> {
    let email_id = non_empty(req.email_id)
        .ok_or_else(|| ApiError::BadRequest("emailId is required".to_string()))?;

    let mut emails = state.inbox.load().await?;
    let templates = state.prompts.load().await?;
    let index = inbox::position(&emails, &email_id)?;

    let updated = state.assistant.process(&emails[index], &templates).await?;
    emails[index] = updated.clone();
    state.inbox.save(&emails).await?;

    Ok(Json(EmailAck::new(updated)))
}

/// POST /api/chat — answer a question about one email or the whole inbox
pub async fn chat(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ChatPayload>,
) -> Result<Json<ChatReply>, ApiError> {
    let emails = state.inbox.load().await?;

    let context = match non_empty(req.context_email_id) {
        Some(id) => inbox::find(&emails, &id)
            .map(ChatContext::Email)
            .unwrap_or(ChatContext::Nothing),
        None => ChatContext::Inbox(&emails),
    };

    let reply = state.assistant.chat(&req.message, context).await?;
    Ok(Json(ChatReply { reply }))
}

/// POST /api/draft — generate a reply (with emailId) or a new email
pub async fn generate_draft(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenerateDraftPayload>,
) -> Result<Json<DraftReply>, ApiError> {
    let emails = state.inbox.load().await?;
    let templates = state.prompts.load().await?;

    let original = match non_empty(req.email_id) {
        Some(id) => Some(
            inbox::find(&emails, &id)
                .ok_or_else(|| ApiError::NotFound("Email not found".to_string()))?,
        ),
        None => None,
    };

    let draft = state
        .assistant
        .draft(original, req.instructions.as_deref(), &templates)
        .await?;
    Ok(Json(DraftReply { draft }))
}
