//! LLM access: credential rotation, the rate-limit aware invoker, and the
//! OpenAI-compatible chat-completion client.

pub mod client;
pub mod error;
pub mod invoker;
pub mod pool;

pub use client::{ChatCompletion, ChatMessage, ChatRequest, HttpChatClient};
pub use error::LlmError;
pub use invoker::Invoker;
pub use pool::CredentialPool;

#[cfg(test)]
pub mod testing;
