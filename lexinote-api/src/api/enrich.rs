use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::enrich::{GrammarChecker, SuggestionGenerator};
use crate::models::vocab::{GrammarReport, VocabItem};

#[derive(Clone)]
pub struct EnrichState {
    pub grammar: Arc<GrammarChecker>,
    pub suggestions: Arc<SuggestionGenerator>,
}

#[derive(Debug, Deserialize)]
pub struct GrammarRequest {
    pub items: Vec<VocabItem>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub items: Vec<VocabItem>,
    #[serde(default)]
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub items: Vec<VocabItem>,
}

/// Best-effort grammar review; never fails.
pub async fn check_grammar(
    State(state): State<EnrichState>,
    Json(request): Json<GrammarRequest>,
) -> Json<GrammarReport> {
    Json(state.grammar.check(&request.items).await)
}

/// Best-effort candidate additions on the current theme; never fails.
pub async fn suggest_items(
    State(state): State<EnrichState>,
    Json(request): Json<SuggestRequest>,
) -> Json<SuggestResponse> {
    let items = state
        .suggestions
        .suggest(&request.items, &request.theme)
        .await;
    Json(SuggestResponse { items })
}
