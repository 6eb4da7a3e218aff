use std::future::Future;
use std::sync::Arc;

use super::error::LlmError;
use super::pool::CredentialPool;

/// Runs an LLM call with the pool's current key, rotating to the next key
/// whenever the provider reports a rate limit.
#[derive(Debug, Clone)]
pub struct Invoker {
    pool: Arc<CredentialPool>,
}

impl Invoker {
    pub fn new(pool: Arc<CredentialPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<CredentialPool> {
        &self.pool
    }

    /// Execute `operation` with the selected key.
    ///
    /// A rate-limited attempt advances the cursor and retries with the next
    /// key, at most once per key known when the call started. Any other error
    /// is returned as-is. If every attempt was rate limited the call fails
    /// with [`LlmError::KeysExhausted`]. The cursor is never reset afterwards.
    pub async fn call<T, F, Fut>(&self, mut operation: F) -> Result<T, LlmError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        if self.pool.is_empty() {
            return Err(LlmError::NoCredentials);
        }
        let attempts = self.pool.len();

        for _ in 0..attempts {
            let (index, key) = self.pool.current().ok_or(LlmError::NoCredentials)?;

            match operation(key.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => {
                    tracing::warn!(
                        "Rate limit exceeded with key index {}. Switching keys...",
                        index
                    );
                    let next = self.pool.rotate_from(&key);
                    tracing::info!("Switched to API key index {}", next);
                }
                Err(err) => {
                    tracing::error!("LLM API error: {}", err);
                    return Err(err);
                }
            }
        }

        Err(LlmError::KeysExhausted { attempts })
    }
}
