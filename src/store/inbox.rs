use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::StoreError;

/// Sender address used for drafts composed in the app.
pub const SELF_ADDRESS: &str = "me@company.com";

/// A reply or standalone message body still being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub follow_ups: Vec<String>,
    /// Anything else the generator returned (e.g. `metadata`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One inbox entry as stored in the inbox file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Extracted action items, normally `{"tasks": [...]}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<Draft>,
    /// Fields this service does not know about, kept so rewrites are lossless.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

pub fn find<'a>(emails: &'a [Email], id: &str) -> Option<&'a Email> {
    emails.iter().find(|e| e.id == id)
}

pub fn position(emails: &[Email], id: &str) -> Result<usize, StoreError> {
    emails
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
}

/// Strip triage results from every received email. Drafts are left alone.
/// Returns how many records were touched.
pub fn reset_classifications(emails: &mut [Email]) -> usize {
    let mut count = 0;
    for email in emails.iter_mut().filter(|e| !e.is_draft) {
        email.category = None;
        email.actions = None;
        email.processed = None;
        count += 1;
    }
    count
}

/// Replace the draft attached to email `id`; nothing else on it changes.
pub fn attach_draft<'a>(
    emails: &'a mut [Email],
    id: &str,
    draft: Draft,
) -> Result<&'a Email, StoreError> {
    let index = position(emails, id)?;
    let email = &mut emails[index];
    email.draft = Some(draft);
    Ok(email)
}

/// Build a new standalone draft email and put it at the top of the inbox.
pub fn create_standalone_draft(emails: &mut Vec<Email>, draft: Draft, now: DateTime<Utc>) -> &Email {
    let subject = if draft.subject.is_empty() {
        "(No Subject)".to_string()
    } else {
        draft.subject.clone()
    };

    let email = Email {
        id: next_draft_id(emails, now),
        sender: SELF_ADDRESS.to_string(),
        subject,
        body: draft.body.clone(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        read: true,
        is_draft: true,
        category: Some("Draft".to_string()),
        actions: None,
        processed: None,
        draft: Some(draft),
        extra: Map::new(),
    };

    emails.insert(0, email);
    &emails[0]
}

/// Millisecond timestamp as a string, bumped until no existing email uses it.
fn next_draft_id(emails: &[Email], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if find(emails, &candidate).is_none() {
            return candidate;
        }
        millis += 1;
    }
}
