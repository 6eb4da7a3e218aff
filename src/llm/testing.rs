//! Scripted chat backend for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{ChatCompletion, ChatRequest};
use super::error::LlmError;

/// Replies with queued results in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    pub seen: Mutex<Vec<(String, ChatRequest)>>,
}

impl ScriptedChat {
    pub fn replying(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String, LlmError> {
        self.seen
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("script exhausted".to_string())))
    }
}
