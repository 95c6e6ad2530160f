use crate::{error::Result, models::*, state::AppState};
use axum::{extract::State, Json};
use srefi_core::ParticipantFlow;
use std::sync::Arc;
use tracing::debug;

/// One participant submit; each request is a fresh flow.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    debug!(talent = %req.talent, "Participant submit");

    let mut flow = ParticipantFlow::with_table(state.store.clone(), state.suggestions);
    let outcome = flow.submit(&req.name, &req.talent).await?;

    Ok(Json(SubmitResponse::new(flow.state().as_str(), outcome)))
}
