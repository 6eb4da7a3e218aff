use std::path::PathBuf;
use std::time::Duration;

/// Keys used when neither `GROQ_API_KEY` nor `GROQ_API_KEYS` is set. They let
/// the server start so a real key can be supplied later through `/api/config`.
const PLACEHOLDER_KEYS: [&str; 2] = ["gsk_placeholder_key_1", "gsk_placeholder_key_2"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub inbox_file: PathBuf,
    pub prompts_file: PathBuf,
}

#[derive(Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_keys: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_keys", &format!("<{} keys>", self.api_keys.len()))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir =
            PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

        Ok(Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3001".to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                inbox_file: std::env::var("INBOX_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| data_dir.join("inbox.json")),
                prompts_file: std::env::var("PROMPTS_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| data_dir.join("prompts.json")),
            },
            llm: LlmConfig {
                base_url: std::env::var("LLM_BASE_URL")
                    .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
                model: std::env::var("LLM_MODEL")
                    .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
                api_keys: parse_api_keys(
                    std::env::var("GROQ_API_KEY").ok(),
                    std::env::var("GROQ_API_KEYS").ok(),
                ),
                timeout_secs: match std::env::var("LLM_TIMEOUT_SECS") {
                    Ok(secs) => Some(secs.parse()?),
                    Err(_) => None,
                },
            },
        })
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn uses_placeholder_keys(&self) -> bool {
        self.api_keys.iter().all(|k| PLACEHOLDER_KEYS.contains(&k.as_str()))
    }
}

/// Primary key first, then the comma-separated extras, skipping blanks and
/// duplicates. Falls back to the placeholder keys when nothing is configured.
fn parse_api_keys(primary: Option<String>, extra: Option<String>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let extra = extra.unwrap_or_default();
    let candidates = primary
        .iter()
        .map(String::as_str)
        .chain(extra.split(','))
        .map(str::trim)
        .filter(|k| !k.is_empty());

    for key in candidates {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }

    if keys.is_empty() {
        keys = PLACEHOLDER_KEYS.iter().map(|k| k.to_string()).collect();
    }
    keys
}
