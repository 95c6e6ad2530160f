use crate::{models::*, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

/// Suggestions for a talent, without storing anything.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestionQuery>,
) -> Json<SuggestionResponse> {
    let suggestions = state.suggestions.lookup(&query.talent);
    Json(SuggestionResponse {
        talent: query.talent,
        suggestions,
    })
}

pub async fn keywords(State(state): State<Arc<AppState>>) -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        keywords: state.suggestions.keywords(),
    })
}
