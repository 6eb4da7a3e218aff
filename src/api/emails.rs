use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::JsonBody;
use crate::api::{Ack, EmailAck};
use crate::store::{inbox, Draft, Email};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftPayload {
    pub draft: Draft,
}

/// GET /api/emails
pub async fn list_emails(State(state): State<AppState>) -> Result<Json<Vec<Email>>, ApiError> {
    Ok(Json(state.inbox.load().await?))
}

/// POST /api/emails/:id/draft — attach or replace the reply draft on an email
pub async fn save_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<DraftPayload>,
) -> Result<Json<EmailAck>, ApiError> {
    let mut emails = state.inbox.load().await?;
    let email = inbox::attach_draft(&mut emails, &id, payload.draft)?.clone();
    state.inbox.save(&emails).await?;

    tracing::info!("Draft saved on email {}", id);
    Ok(Json(EmailAck::new(email)))
}

/// POST /api/emails/draft — add a standalone draft to the top of the inbox
pub async fn create_draft(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DraftPayload>,
) -> Result<Json<EmailAck>, ApiError> {
    let mut emails = state.inbox.load().await?;
    let email = inbox::create_standalone_draft(&mut emails, payload.draft, Utc::now()).clone();
    state.inbox.save(&emails).await?;

    tracing::info!("Draft email {} created", email.id);
    Ok(Json(EmailAck::new(email)))
}

/// POST /api/reset — clear categories and action items from received mail
pub async fn reset_inbox(State(state): State<AppState>) -> Result<Json<Ack>, ApiError> {
    let mut emails = state.inbox.load().await?;
    let count = inbox::reset_classifications(&mut emails);
    state.inbox.save(&emails).await?;

    tracing::info!("Inbox reset: {} emails cleared", count);
    Ok(Json(Ack::ok()))
}
