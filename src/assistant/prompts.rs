use serde_json::{json, Value};

use crate::store::{Draft, Email};

pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful Email Productivity Agent. You have access \
to the user's emails. ALWAYS format your responses using Markdown. Use bullet points for lists, \
bold text for important details (like **Subject** or **From**), and keep responses concise and \
easy to read.";

const DRAFT_FORMAT_INSTRUCTION: &str = "Respond in JSON format: { \"subject\": \"...\", \
\"body\": \"...\", \"followUps\": [\"...\"], \"metadata\": {...} }";

const DEFAULT_INSTRUCTIONS: &str = "Draft an email.";

/// What the chat agent is told about the mailbox.
#[derive(Debug, Clone, Copy)]
pub enum ChatContext<'a> {
    /// The user has one email open.
    Email(&'a Email),
    /// No email selected: summarize the inbox.
    Inbox(&'a [Email]),
    /// An email was requested but does not exist.
    Nothing,
}

/// User turn shared by categorization and action extraction.
pub fn email_content(email: &Email) -> String {
    format!("Subject: {}\nBody: {}", email.subject, email.body)
}

pub fn chat_system_prompt(context: ChatContext<'_>) -> String {
    let mut prompt = CHAT_SYSTEM_PROMPT.to_string();
    match context {
        ChatContext::Email(email) => {
            prompt.push_str(&format!(
                "\n\nCurrently viewing email:\nSubject: {}\nFrom: {}\nBody: {}",
                email.subject, email.sender, email.body
            ));
        }
        ChatContext::Inbox(emails) => {
            let summary = emails
                .iter()
                .map(|e| {
                    format!(
                        "- ID: {}, From: {}, Subject: {}, Category: {}, Read: {}",
                        e.id,
                        e.sender,
                        e.subject,
                        e.category.as_deref().unwrap_or("Uncategorized"),
                        e.read
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            prompt.push_str(&format!(
                "\n\nCurrent Inbox State:\n{}\n\nWhen asked to list or find emails, use the IDs provided.",
                summary
            ));
        }
        ChatContext::Nothing => {}
    }
    prompt
}

pub fn draft_system_prompt(auto_reply: &str) -> String {
    format!(
        "You are an email drafting assistant. {} {}",
        auto_reply, DRAFT_FORMAT_INSTRUCTION
    )
}

pub fn draft_user_prompt(original: Option<&Email>, instructions: Option<&str>) -> String {
    let context = original
        .map(|e| format!("Original Email:\nSubject: {}\nBody: {}\n\n", e.subject, e.body))
        .unwrap_or_default();
    let instructions = instructions
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_INSTRUCTIONS);
    format!("{}User Instructions: {}", context, instructions)
}

/// Trimmed category, or "Uncategorized" for an empty reply.
pub fn parse_category(raw: &str) -> String {
    let category = raw.trim();
    if category.is_empty() {
        "Uncategorized".to_string()
    } else {
        category.to_string()
    }
}

/// Action items as returned by the model; `{"tasks": []}` if unparseable.
pub fn parse_actions(raw: &str) -> Value {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    match serde_json::from_str::<Value>(raw) {
        Ok(actions) => actions,
        Err(e) => {
            tracing::warn!("Failed to parse JSON actions: {}", e);
            json!({ "tasks": [] })
        }
    }
}

/// Generated draft; an empty draft if the model's JSON does not fit.
pub fn parse_draft(raw: &str) -> Draft {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    match serde_json::from_str::<Draft>(raw) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!("Failed to parse generated draft: {}", e);
            Draft::default()
        }
    }
}
