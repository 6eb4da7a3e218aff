mod api;
mod assistant;
mod config;
mod llm;
mod store;

use std::sync::Arc;

use anyhow::bail;

use assistant::Assistant;
use config::AppConfig;
use llm::{CredentialPool, HttpChatClient, Invoker};
use store::{inbox, Email, JsonFile, PromptSet};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inbox: JsonFile<Vec<Email>>,
    pub prompts: JsonFile<PromptSet>,
    pub assistant: Arc<Assistant>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    let inbox_file = JsonFile::new(config.storage.inbox_file.clone());

    if std::env::args().nth(1).as_deref() == Some("reset-inbox") {
        return reset_inbox(&inbox_file).await;
    }

    tracing::info!("Inboxpilot starting...");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Inbox: {}", config.storage.inbox_file.display());
    tracing::info!("Prompts: {}", config.storage.prompts_file.display());

    // Credential pool and LLM client
    let pool = Arc::new(CredentialPool::new(config.llm.api_keys.clone()));
    if config.llm.uses_placeholder_keys() {
        tracing::warn!("No GROQ_API_KEY configured; supply one via POST /api/config");
    }
    tracing::info!(
        "Initialized {} API keys, starting at index {}",
        pool.len(),
        pool.cursor()
    );

    let client = HttpChatClient::new(config.llm.base_url.clone(), config.llm.timeout())?;
    tracing::info!("LLM: {} via {}", config.llm.model, client.base_url());

    let assistant = Assistant::new(Arc::new(client), Invoker::new(pool), config.llm.model.clone());

    // Build app state
    let state = AppState {
        inbox: inbox_file,
        prompts: JsonFile::new(config.storage.prompts_file.clone()),
        assistant: Arc::new(assistant),
    };

    // Build router
    let app = api::router::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Inboxpilot API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `inboxpilot reset-inbox`: clear triage results in the inbox file and exit.
async fn reset_inbox(inbox_file: &JsonFile<Vec<Email>>) -> anyhow::Result<()> {
    if !inbox_file.exists().await? {
        bail!("Inbox file not found: {}", inbox_file.path().display());
    }

    let mut emails = inbox_file.load().await?;
    let count = inbox::reset_classifications(&mut emails);
    inbox_file.save(&emails).await?;

    tracing::info!(
        "Inbox reset: cleared categories and actions on {} emails",
        count
    );
    Ok(())
}
