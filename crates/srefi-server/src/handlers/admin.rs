use crate::{error::Result, models::*, state::AppState};
use axum::{
    extract::{Extension, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use srefi_core::{AdminFlow, SessionContext};
use srefi_types::{Identity, SubmissionId};
use std::sync::Arc;

/// Flow for a caller already verified by the session middleware.
fn admin_flow(state: &AppState, identity: Identity) -> AdminFlow {
    let session = Arc::new(SessionContext::restore(
        state.authenticator.clone(),
        identity,
    ));
    AdminFlow::new(state.store.clone(), session)
}

fn list_response(flow: &AdminFlow) -> SubmissionListResponse {
    SubmissionListResponse {
        filter: flow.filter().to_string(),
        total: flow.records().len(),
        records: flow
            .visible()
            .into_iter()
            .map(SubmissionResponse::from)
            .collect(),
    }
}

pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SubmissionListResponse>> {
    let mut flow = admin_flow(&state, identity);
    flow.refresh().await?;
    flow.set_filter(query.talent);

    Ok(Json(list_response(&flow)))
}

pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SubmissionListResponse>> {
    let mut flow = admin_flow(&state, identity);
    flow.set_filter(query.talent);
    flow.delete(&SubmissionId::new(id)).await?;

    Ok(Json(list_response(&flow)))
}

/// CSV download of the filtered rows.
pub async fn export_submissions(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse> {
    let mut flow = admin_flow(&state, identity);
    flow.refresh().await?;
    flow.set_filter(query.talent);

    let export = flow.export_csv()?;
    let headers = [
        (
            header::CONTENT_TYPE,
            format!("{}; charset=utf-8", export.content_type),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];

    Ok((headers, export.bytes))
}
