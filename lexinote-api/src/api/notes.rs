use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::core::pipeline::{Extraction, Extractor, Refiner};
use crate::models::error::{ApiError, ApiResult};
use crate::models::vocab::VocabItem;

#[derive(Clone)]
pub struct NotesState {
    pub extractor: Arc<Extractor>,
    pub refiner: Arc<Refiner>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub items: Vec<VocabItem>,
    /// Original notes, carried by the front-end for display. Refinement
    /// works from the item list alone.
    #[serde(default)]
    pub notes: String,
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractionResponse {
    pub theme: String,
    pub preview: String,
    pub items: Vec<VocabItem>,
}

impl From<Extraction> for ExtractionResponse {
    fn from(extraction: Extraction) -> Self {
        Self {
            theme: extraction.theme,
            preview: extraction.preview,
            items: extraction.items,
        }
    }
}

pub async fn process_notes(
    State(state): State<NotesState>,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.notes.trim().is_empty() {
        return Err(ApiError::BadRequest("notes must not be empty".to_string()));
    }

    let extraction = state.extractor.extract(&request.notes).await?;
    Ok(Json(ExtractionResponse::from(extraction)))
}

pub async fn refine_notes(
    State(state): State<NotesState>,
    Json(request): Json<RefineRequest>,
) -> ApiResult<impl IntoResponse> {
    debug!(
        items = request.items.len(),
        notes_chars = request.notes.chars().count(),
        "refining items"
    );

    let extraction = state
        .refiner
        .refine(&request.items, &request.feedback)
        .await?;
    Ok(Json(ExtractionResponse::from(extraction)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::post;
    use axum_test::TestServer;
    use lexinote_claude::mock::MockProvider;
    use serde_json::{Value, json};

    fn server(provider: Arc<MockProvider>) -> TestServer {
        let state = NotesState {
            extractor: Arc::new(Extractor::new(provider.clone(), 4096)),
            refiner: Arc::new(Refiner::new(provider, 4096)),
        };
        let app = Router::new()
            .route("/api/process", post(process_notes))
            .route("/api/refine", post(refine_notes))
            .with_state(state);
        TestServer::new(app).expect("test server")
    }

    const REPLY: &str = r#"{"theme": "学习方法", "items": [{"english": "dig into", "chinese": "深入研究", "example_en": "Dig into the topic.", "example_zh": "深入研究这个话题。"}]}"#;

    #[tokio::test]
    async fn process_returns_theme_preview_and_items() {
        let server = server(Arc::new(MockProvider::new([REPLY])));

        let response = server
            .post("/api/process")
            .json(&json!({"notes": "dig into the topic 深入研究这个话题"}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["theme"], "学习方法");
        assert_eq!(body["items"][0]["english"], "dig into");
        assert!(
            body["preview"]
                .as_str()
                .unwrap()
                .contains("1. dig into 深入研究")
        );
    }

    #[tokio::test]
    async fn process_rejects_blank_notes_before_any_remote_call() {
        let provider = Arc::new(MockProvider::default());
        let server = server(provider.clone());

        let response = server.post("/api/process").json(&json!({"notes": "   "})).await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn process_maps_unparseable_reply_to_bad_gateway() {
        let server = server(Arc::new(MockProvider::new(["no json here"])));

        let response = server
            .post("/api/process")
            .json(&json!({"notes": "some notes"}))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

        let body: Value = response.json();
        assert_eq!(body["error"]["type"], "model_reply_error");
    }

    #[tokio::test]
    async fn refine_passes_items_and_feedback_through() {
        let provider = Arc::new(MockProvider::new([REPLY]));
        let server = server(provider.clone());

        let response = server
            .post("/api/refine")
            .json(&json!({
                "items": [
                    {"english": "dig into", "chinese": "深入研究", "example_en": "e", "example_zh": "例"},
                    {"english": "set up", "chinese": "建立", "example_en": "e", "example_zh": "例"}
                ],
                "notes": "original notes",
                "feedback": "remove 2"
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("2. set up 建立"));
        assert!(prompt.contains("remove 2"));
        // The raw notes stay out of the refinement prompt.
        assert!(!prompt.contains("original notes"));
    }
}
