use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::notion::NotionStore;
use crate::models::vocab::VocabItem;

#[derive(Clone)]
pub struct SaveState {
    pub store: Arc<NotionStore>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub items: Vec<VocabItem>,
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
    pub failed: usize,
}

/// Persists accepted items. Individual write failures are counted, not
/// escalated, so this handler is infallible.
pub async fn save_items(
    State(state): State<SaveState>,
    Json(request): Json<SaveRequest>,
) -> Json<SaveResponse> {
    let outcome = state.store.save_items(&request.items, &request.theme).await;
    Json(SaveResponse {
        saved: outcome.saved,
        failed: outcome.failed,
    })
}
