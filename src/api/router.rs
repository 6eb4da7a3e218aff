use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::api::{assistant, config, emails, prompts};
use crate::AppState;

/// Simple request logger middleware
async fn log_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    tracing::info!(">>> {} {}", method, uri);
    let res = next.run(req).await;
    tracing::info!("<<< {} {} -> {}", method, uri, res.status());
    res
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the JSON API consumed by the inbox UI
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Inbox
        .route("/emails", get(emails::list_emails))
        .route("/emails/draft", post(emails::create_draft))
        .route("/emails/:id/draft", post(emails::save_draft))
        .route("/reset", post(emails::reset_inbox))
        // Prompt templates
        .route(
            "/prompts",
            get(prompts::get_prompts).post(prompts::update_prompts),
        )
        // Credential pool
        .route("/config", post(config::update_api_key))
        // LLM features
        .route("/process", post(assistant::process_email))
        .route("/chat", post(assistant::chat))
        .route("/draft", post(assistant::generate_draft));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(middleware::from_fn(log_middleware))
        // The UI is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .with_state(state)
}
