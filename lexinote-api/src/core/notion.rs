//! Notion persistence: one page per accepted vocabulary item.
//!
//! Writes are sequential and fail-open per item: a failed page create is
//! logged and counted, and the rest of the batch still runs. There is no
//! dedup key, so saving the same items twice creates duplicate pages.

use chrono::Local;
use serde_json::json;
use tracing::{info, warn};

use crate::models::vocab::VocabItem;

const DEFAULT_BASE_URL: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notion API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Outcome of one save batch. `saved + failed` always equals the batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: usize,
    pub failed: usize,
}

pub struct NotionStore {
    http: reqwest::Client,
    token: String,
    database_id: String,
    base_url: String,
}

impl NotionStore {
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            database_id: database_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL. Used by tests to point the store at a
    /// local stand-in server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Writes one page per item under the configured database.
    pub async fn save_items(&self, items: &[VocabItem], theme: &str) -> SaveOutcome {
        self.log_database_schema().await;

        let mut saved = 0;
        let mut failed = 0;
        for item in items {
            match self.create_page(item, theme).await {
                Ok(()) => saved += 1,
                Err(err) => {
                    warn!(english = %item.english, %err, "failed to save item");
                    failed += 1;
                }
            }
        }

        info!(saved, failed, theme = %theme, "save batch finished");
        SaveOutcome { saved, failed }
    }

    /// Fetches the target database and logs its property names. Failure here
    /// is tolerated; the save loop runs either way.
    async fn log_database_schema(&self) {
        match self.retrieve_schema().await {
            Ok(properties) => info!(?properties, "notion database properties"),
            Err(err) => warn!(%err, "failed to retrieve notion database"),
        }
    }

    async fn retrieve_schema(&self) -> Result<Vec<String>, NotionError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/databases/{}",
                self.base_url, self.database_id
            ))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let body: serde_json::Value = check(response).await?.json().await?;
        Ok(body
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_page(&self, item: &VocabItem, theme: &str) -> Result<(), NotionError> {
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                "English": {
                    "title": [{ "text": { "content": item.english } }]
                },
                "Chinese": {
                    "rich_text": [{ "text": { "content": item.chinese } }]
                },
                "Example": {
                    "rich_text": [{
                        "text": {
                            "content": format!("{} {}", item.example_en, item.example_zh)
                        }
                    }]
                },
                "Theme": {
                    "select": { "name": theme }
                },
                "Date": {
                    "date": { "start": Local::now().date_naive().to_string() }
                }
            }
        });

        let response = self
            .http
            .post(format!("{}/v1/pages", self.base_url))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, NotionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NotionError::Api {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct FakeNotion {
        page_attempts: Arc<AtomicUsize>,
        schema_hits: Arc<AtomicUsize>,
    }

    async fn retrieve_database(State(state): State<FakeNotion>) -> Json<Value> {
        state.schema_hits.fetch_add(1, Ordering::SeqCst);
        Json(json!({
            "properties": {"English": {}, "Chinese": {}, "Example": {}, "Theme": {}, "Date": {}}
        }))
    }

    // Rejects any page whose title contains "reject me".
    async fn create_page(
        State(state): State<FakeNotion>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        state.page_attempts.fetch_add(1, Ordering::SeqCst);

        let title = body["properties"]["English"]["title"][0]["text"]["content"]
            .as_str()
            .unwrap_or_default();
        if title.contains("reject me") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"object": "error", "message": "validation_error"})),
            );
        }

        assert_eq!(body["parent"]["database_id"], "db-123");
        assert!(
            body["properties"]["Example"]["rich_text"][0]["text"]["content"]
                .as_str()
                .unwrap()
                .contains(' ')
        );
        assert!(body["properties"]["Date"]["date"]["start"].is_string());

        (StatusCode::OK, Json(json!({"object": "page"})))
    }

    async fn spawn(state: FakeNotion) -> SocketAddr {
        let router = Router::new()
            .route("/v1/databases/:id", get(retrieve_database))
            .route("/v1/pages", post(create_page))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn item(english: &str) -> VocabItem {
        VocabItem {
            english: english.to_string(),
            chinese: "中文".to_string(),
            example_en: "An example.".to_string(),
            example_zh: "一个例句。".to_string(),
        }
    }

    #[tokio::test]
    async fn every_item_is_attempted_and_failures_are_counted() {
        let fake = FakeNotion::default();
        let addr = spawn(fake.clone()).await;
        let store =
            NotionStore::new("secret", "db-123").with_base_url(format!("http://{addr}"));

        let items = vec![item("dig into"), item("reject me"), item("set up")];
        let outcome = store.save_items(&items, "学习方法").await;

        assert_eq!(outcome, SaveOutcome { saved: 2, failed: 1 });
        assert_eq!(fake.page_attempts.load(Ordering::SeqCst), 3);
        assert_eq!(fake.schema_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_batch_saves_nothing() {
        let fake = FakeNotion::default();
        let addr = spawn(fake.clone()).await;
        let store =
            NotionStore::new("secret", "db-123").with_base_url(format!("http://{addr}"));

        let outcome = store.save_items(&[], "学习方法").await;
        assert_eq!(outcome, SaveOutcome { saved: 0, failed: 0 });
        assert_eq!(fake.page_attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_schema_endpoint_does_not_block_saves() {
        let fake = FakeNotion::default();
        let router = Router::new()
            .route("/v1/pages", post(create_page))
            .with_state(fake.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let store =
            NotionStore::new("secret", "db-123").with_base_url(format!("http://{addr}"));
        let outcome = store.save_items(&[item("dig into")], "学习方法").await;
        assert_eq!(outcome, SaveOutcome { saved: 1, failed: 0 });
    }

    #[tokio::test]
    async fn repeated_saves_create_duplicate_pages() {
        let fake = FakeNotion::default();
        let addr = spawn(fake.clone()).await;
        let store =
            NotionStore::new("secret", "db-123").with_base_url(format!("http://{addr}"));

        let items = vec![item("dig into")];
        store.save_items(&items, "学习方法").await;
        store.save_items(&items, "学习方法").await;
        assert_eq!(fake.page_attempts.load(Ordering::SeqCst), 2);
    }
}
