pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtAuth};
pub use middleware::{bearer_token, session_middleware, verify_bearer, AuthState};
pub use password::PasswordHasher;
