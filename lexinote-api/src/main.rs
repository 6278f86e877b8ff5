use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod core;
mod middleware;
mod models;
mod utils;

use crate::core::{
    config::Settings,
    enrich::{GrammarChecker, SuggestionGenerator},
    notion::NotionStore,
    pipeline::{Extractor, Refiner},
};
use lexinote_claude::{ClaudeClient, CompletionProvider};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new()?;

    info!(
        "Starting Lexinote API on {}:{}",
        settings.server.host, settings.server.port
    );

    let app = create_app(&settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(settings: &Settings) -> Router {
    use crate::middleware::{request_id, request_log};
    use axum::middleware;

    let cors = CorsLayer::permissive();

    let provider: Arc<dyn CompletionProvider> = Arc::new(ClaudeClient::new(
        settings.claude.api_key.clone(),
        settings.claude.model.clone(),
    ));
    let max_tokens = settings.claude.max_tokens;

    let notes_state = api::notes::NotesState {
        extractor: Arc::new(Extractor::new(provider.clone(), max_tokens)),
        refiner: Arc::new(Refiner::new(provider.clone(), max_tokens)),
    };

    let enrich_state = api::enrich::EnrichState {
        grammar: Arc::new(GrammarChecker::new(provider.clone(), max_tokens)),
        suggestions: Arc::new(SuggestionGenerator::new(provider, max_tokens)),
    };

    let save_state = api::save::SaveState {
        store: Arc::new(NotionStore::new(
            settings.notion.token.clone(),
            settings.notion.database_id.clone(),
        )),
    };

    let notes_routes = Router::new()
        .route("/api/process", post(api::notes::process_notes))
        .route("/api/refine", post(api::notes::refine_notes))
        .with_state(notes_state);

    let enrich_routes = Router::new()
        .route("/api/grammar", post(api::enrich::check_grammar))
        .route("/api/suggest", post(api::enrich::suggest_items))
        .with_state(enrich_state);

    let save_routes = Router::new()
        .route("/api/save", post(api::save::save_items))
        .with_state(save_state);

    Router::new()
        .route("/health", get(health_check))
        .merge(notes_routes)
        .merge(enrich_routes)
        .merge(save_routes)
        .layer(middleware::from_fn(request_id::add_request_id))
        .layer(middleware::from_fn(request_log::log_failures))
        .layer(cors)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    fn test_settings() -> Settings {
        Settings {
            server: crate::core::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            claude: crate::core::config::ClaudeConfig {
                api_key: "test-key".to_string(),
                model: "claude-sonnet-4-20250514".to_string(),
                max_tokens: 4096,
            },
            notion: crate::core::config::NotionConfig {
                token: "test-token".to_string(),
                database_id: "db".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn health_endpoint_answers_ok() {
        let server = TestServer::new(create_app(&test_settings())).expect("test server");
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let server = TestServer::new(create_app(&test_settings())).expect("test server");
        let response = server.get("/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}
