use srefi_core::{Authenticator, SubmissionStore, SuggestionTable};
use srefi_middleware::AuthState;
use std::sync::Arc;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub authenticator: Arc<dyn Authenticator>,
    pub auth: AuthState,
    pub suggestions: SuggestionTable,
}
