use serde::{Deserialize, Serialize};

/// The three user-editable system prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSet {
    #[serde(default)]
    pub categorization: String,
    #[serde(default)]
    pub action_item: String,
    #[serde(default)]
    pub auto_reply: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            categorization: "Categorize the email into exactly one of: Important, Newsletter, \
                Spam, To-Do. Respond with the category name only."
                .to_string(),
            action_item: "Extract the tasks the recipient needs to do from the email. \
                Respond in JSON: { \"tasks\": [{ \"task\": \"...\", \"deadline\": \"...\" }] }. \
                Use an empty list when there are none."
                .to_string(),
            auto_reply: "Write a polite, concise reply. If the email is a meeting request, \
                ask for an agenda."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let prompts: PromptSet = serde_json::from_str(
            r#"{"categorization":"c","action_item":"a","auto_reply":"r"}"#,
        )
        .unwrap();
        assert_eq!(prompts.categorization, "c");
        assert_eq!(prompts.action_item, "a");
        assert_eq!(prompts.auto_reply, "r");
    }

    #[test]
    fn test_missing_field_is_empty() {
        let prompts: PromptSet = serde_json::from_str(r#"{"categorization":"c"}"#).unwrap();
        assert!(prompts.auto_reply.is_empty());
    }
}
