pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use anyhow::Result;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use srefi_core::{DatabaseSubmissionStore, SuggestionTable};
use srefi_middleware::{session_middleware, AuthState, JwtAuth, MemorySessionStore, PasswordHasher, SessionManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::AppConfig;
pub use state::AppState;

/// Wire the store, authenticator and session layer over `db`.
pub fn build_state(db: sea_orm::DatabaseConnection, config: &AppConfig) -> Arc<AppState> {
    let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    let sessions = SessionManager::new(
        Arc::new(MemorySessionStore::new()),
        Duration::from_secs(config.auth.session_ttl_secs),
    );

    Arc::new(AppState {
        store: Arc::new(DatabaseSubmissionStore::new(db.clone())),
        authenticator: Arc::new(auth::DbAuthenticator::new(db, hasher)),
        auth: AuthState {
            jwt: Arc::new(JwtAuth::new(
                config.auth.jwt_secret.clone(),
                config.auth.token_ttl_hours,
            )),
            sessions: Arc::new(sessions),
        },
        suggestions: SuggestionTable::builtin(),
    })
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/v1/auth/me", get(handlers::me))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/admin/submissions", get(handlers::list_submissions))
        .route("/api/v1/admin/submissions/export", get(handlers::export_submissions))
        .route("/api/v1/admin/submissions/:id", delete(handlers::delete_submission))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/suggestions", get(handlers::suggest))
        .route("/api/v1/suggestions/keywords", get(handlers::keywords))
        .route("/api/v1/submissions", post(handlers::submit))
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &config::LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

pub async fn start_server(config: AppConfig) -> Result<()> {
    let db = database::connect(&config.database).await?;
    let state = build_state(db, &config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
