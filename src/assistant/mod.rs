//! The LLM-backed features: triage (category + action items), the chat
//! agent, and draft generation. Every call goes through the [`Invoker`] so a
//! rate-limited key is rotated out transparently.

pub mod prompts;

use std::sync::Arc;

use serde_json::Value;

use crate::llm::{ChatCompletion, ChatMessage, ChatRequest, Invoker, LlmError};
use crate::store::{Draft, Email, PromptSet};

pub use prompts::ChatContext;

pub struct Assistant {
    client: Arc<dyn ChatCompletion>,
    invoker: Invoker,
    model: String,
}

impl Assistant {
    pub fn new(client: Arc<dyn ChatCompletion>, invoker: Invoker, model: impl Into<String>) -> Self {
        Self {
            client,
            invoker,
            model: model.into(),
        }
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    async fn complete(
        &self,
        system: String,
        user: String,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            json_mode,
        };

        let client = self.client.as_ref();
        let request = &request;
        self.invoker
            .call(|key| async move { client.complete(&key, request).await })
            .await
    }

    pub async fn categorize(&self, email: &Email, templates: &PromptSet) -> Result<String, LlmError> {
        let reply = self
            .complete(
                templates.categorization.clone(),
                prompts::email_content(email),
                false,
            )
            .await?;
        Ok(prompts::parse_category(&reply))
    }

    pub async fn extract_actions(
        &self,
        email: &Email,
        templates: &PromptSet,
    ) -> Result<Value, LlmError> {
        let reply = self
            .complete(
                templates.action_item.clone(),
                prompts::email_content(email),
                true,
            )
            .await?;
        Ok(prompts::parse_actions(&reply))
    }

    /// Categorize and extract actions, returning the updated record.
    pub async fn process(&self, email: &Email, templates: &PromptSet) -> Result<Email, LlmError> {
        let category = self.categorize(email, templates).await?;
        let actions = self.extract_actions(email, templates).await?;
        tracing::info!("Processed email {} as '{}'", email.id, category);

        Ok(Email {
            category: Some(category),
            actions: Some(actions),
            processed: Some(true),
            ..email.clone()
        })
    }

    pub async fn chat(&self, message: &str, context: ChatContext<'_>) -> Result<String, LlmError> {
        self.complete(
            prompts::chat_system_prompt(context),
            message.to_string(),
            false,
        )
        .await
    }

    /// Generate a reply to `original`, or a fresh email when it is `None`.
    pub async fn draft(
        &self,
        original: Option<&Email>,
        instructions: Option<&str>,
        templates: &PromptSet,
    ) -> Result<Draft, LlmError> {
        let reply = self
            .complete(
                prompts::draft_system_prompt(&templates.auto_reply),
                prompts::draft_user_prompt(original, instructions),
                true,
            )
            .await?;
        Ok(prompts::parse_draft(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedChat;
    use crate::llm::CredentialPool;
    use serde_json::json;

    fn assistant(chat: Arc<ScriptedChat>, keys: &[&str]) -> Assistant {
        let pool = CredentialPool::new(keys.iter().map(|k| k.to_string()).collect());
        Assistant::new(chat, Invoker::new(Arc::new(pool)), "test-model")
    }

    fn email() -> Email {
        serde_json::from_value(json!({
            "id": "42",
            "sender": "dave@example.com",
            "subject": "Invoice #881",
            "body": "Please pay by the 30th.",
            "timestamp": "2025-01-10T09:00:00Z",
            "read": false
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_process_sets_triage_fields() {
        let chat = Arc::new(ScriptedChat::replying(vec![
            Ok(" To-Do \n".to_string()),
            Ok(r#"{"tasks":[{"task":"Pay invoice"}]}"#.to_string()),
        ]));
        let assistant = assistant(chat.clone(), &["k1"]);
        let templates = PromptSet::default();

        let processed = assistant.process(&email(), &templates).await.unwrap();

        assert_eq!(processed.category.as_deref(), Some("To-Do"));
        assert_eq!(processed.actions.unwrap()["tasks"][0]["task"], "Pay invoice");
        assert_eq!(processed.processed, Some(true));
        assert_eq!(processed.subject, "Invoice #881");

        let requests = chat.requests();
        assert_eq!(requests.len(), 2);
        let (key, categorize) = &requests[0];
        assert_eq!(key, "k1");
        assert_eq!(categorize.model, "test-model");
        assert!(!categorize.json_mode);
        assert_eq!(categorize.messages[0].content, templates.categorization);
        assert_eq!(
            categorize.messages[1].content,
            "Subject: Invoice #881\nBody: Please pay by the 30th."
        );
        assert!(requests[1].1.json_mode);
        assert_eq!(requests[1].1.messages[0].content, templates.action_item);
    }

    #[tokio::test]
    async fn test_malformed_actions_degrade() {
        let chat = Arc::new(ScriptedChat::replying(vec![
            Ok("Important".to_string()),
            Ok("Sure! Here are the tasks:".to_string()),
        ]));
        let assistant = assistant(chat, &["k1"]);

        let processed = assistant
            .process(&email(), &PromptSet::default())
            .await
            .unwrap();

        assert_eq!(processed.actions, Some(json!({ "tasks": [] })));
    }

    #[tokio::test]
    async fn test_rate_limit_rotates_key() {
        let chat = Arc::new(ScriptedChat::replying(vec![
            Err(LlmError::RateLimited {
                status: 429,
                message: "quota".to_string(),
            }),
            Ok("Here you go".to_string()),
        ]));
        let assistant = assistant(chat.clone(), &["k1", "k2"]);

        let reply = assistant
            .chat("What is urgent?", ChatContext::Nothing)
            .await
            .unwrap();

        assert_eq!(reply, "Here you go");
        let keys: Vec<String> = chat.requests().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["k1", "k2"]);
        assert_eq!(assistant.invoker().pool().cursor(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_surfaces() {
        let chat = Arc::new(ScriptedChat::replying(vec![Err(LlmError::Provider {
            status: 500,
            message: "boom".to_string(),
        })]));
        let assistant = assistant(chat.clone(), &["k1", "k2"]);

        let result = assistant.chat("hi", ChatContext::Nothing).await;

        assert!(matches!(result, Err(LlmError::Provider { status: 500, .. })));
        assert_eq!(chat.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_draft_reply() {
        let chat = Arc::new(ScriptedChat::replying(vec![Ok(
            r#"{"subject":"Re: Invoice #881","body":"Paid.","followUps":["Send receipt"],"metadata":{"tone":"brief"}}"#
                .to_string(),
        )]));
        let assistant = assistant(chat.clone(), &["k1"]);
        let original = email();

        let draft = assistant
            .draft(Some(&original), Some("Confirm payment"), &PromptSet::default())
            .await
            .unwrap();

        assert_eq!(draft.subject, "Re: Invoice #881");
        assert_eq!(draft.follow_ups, vec!["Send receipt"]);
        assert_eq!(draft.extra["metadata"]["tone"], "brief");

        let (_, request) = &chat.requests()[0];
        assert!(request.json_mode);
        assert!(request.messages[0]
            .content
            .starts_with("You are an email drafting assistant."));
        assert!(request.messages[1].content.contains("Original Email:"));
    }
}
