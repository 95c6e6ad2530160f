pub mod auth;
pub mod session;

pub use auth::{bearer_token, session_middleware, verify_bearer, AuthState, Claims, JwtAuth, PasswordHasher};
pub use session::{AdminSession, MemorySessionStore, SessionManager, SessionStore};
