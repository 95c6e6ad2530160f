use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use srefi_types::Identity;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{Claims, JwtAuth};
use crate::session::SessionManager;

/// Shared state for [`session_middleware`].
#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<JwtAuth>,
    pub sessions: Arc<SessionManager>,
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

pub fn verify_bearer(jwt: &JwtAuth, headers: &HeaderMap) -> Result<Claims, StatusCode> {
    let token = bearer_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = jwt
        .verify_token(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if jwt.is_expired(&claims) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(claims)
}

/// Requires a valid token backed by a live session of the same account.
///
/// On success the request carries the caller's [`Identity`] and [`Claims`]
/// as extensions.
pub async fn session_middleware(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = verify_bearer(&auth.jwt, req.headers())?;

    let identity: Identity = auth
        .sessions
        .resolve(&claims.sid, &claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or_else(|| {
            warn!(session_id = %claims.sid, uid = %claims.sub, "Token without live session");
            StatusCode::UNAUTHORIZED
        })?;

    debug!(uid = %identity.uid, "Request authenticated");

    req.extensions_mut().insert(identity);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use axum::{
        body::Body, extract::Extension, http::Request as HttpRequest, middleware, routing::get,
        Router,
    };
    use std::time::Duration;
    use tower::ServiceExt;

    async fn whoami(Extension(identity): Extension<Identity>) -> String {
        identity.email
    }

    fn app(state: AuthState) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .layer(middleware::from_fn_with_state(state, session_middleware))
    }

    fn auth_state() -> AuthState {
        AuthState {
            jwt: Arc::new(JwtAuth::new("test-secret".to_string(), 1)),
            sessions: Arc::new(SessionManager::new(
                Arc::new(MemorySessionStore::new()),
                Duration::from_secs(3600),
            )),
        }
    }

    fn request(token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/me");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let response = app(auth_state()).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_session_passes() {
        let state = auth_state();
        let session = state
            .sessions
            .open(&Identity::new("uid-1", "a@b.nl"))
            .await
            .unwrap();
        let token = state
            .jwt
            .generate_token("uid-1", "a@b.nl", &session.session_id)
            .unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_deleted_session_is_unauthorized() {
        let state = auth_state();
        let session = state
            .sessions
            .open(&Identity::new("uid-1", "a@b.nl"))
            .await
            .unwrap();
        let token = state
            .jwt
            .generate_token("uid-1", "a@b.nl", &session.session_id)
            .unwrap();
        state.sessions.close(&session.session_id).await.unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_owned_by_other_user_is_unauthorized() {
        let state = auth_state();
        let session = state
            .sessions
            .open(&Identity::new("uid-2", "c@d.nl"))
            .await
            .unwrap();
        let token = state
            .jwt
            .generate_token("uid-1", "a@b.nl", &session.session_id)
            .unwrap();

        let response = app(state).oneshot(request(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
