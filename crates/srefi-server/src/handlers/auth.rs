use crate::{error::Result, models::*, state::AppState};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use srefi_core::{AdminFlow, SessionContext};
use srefi_middleware::Claims;
use srefi_types::Identity;
use std::sync::Arc;
use tracing::info;

fn anonymous_flow(state: &AppState) -> AdminFlow {
    let session = Arc::new(SessionContext::new(state.authenticator.clone()));
    AdminFlow::new(state.store.clone(), session)
}

/// Opens a server session for `identity` and issues its token.
async fn issue_token(state: &AppState, identity: Identity) -> Result<Json<TokenResponse>> {
    let session = state.auth.sessions.open(&identity).await?;

    let token = state
        .auth
        .jwt
        .generate_token(&identity.uid, &identity.email, &session.session_id)?;

    Ok(Json(TokenResponse {
        token,
        uid: identity.uid,
        email: identity.email,
    }))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>> {
    let flow = anonymous_flow(&state);
    let identity = flow.register(&req.email, &req.password).await?;

    issue_token(&state, identity).await
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>> {
    let flow = anonymous_flow(&state);
    let identity = flow.login(&req.email, &req.password).await?;

    issue_token(&state, identity).await
}

pub async fn me(Extension(identity): Extension<Identity>) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(identity))
}

/// Closes the server session behind the token; the token is rejected from
/// then on.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode> {
    let closed = state.auth.sessions.close(&claims.sid).await?;
    info!(session_id = %claims.sid, uid = %claims.sub, closed = closed, "Administrator signed out");

    Ok(StatusCode::NO_CONTENT)
}
