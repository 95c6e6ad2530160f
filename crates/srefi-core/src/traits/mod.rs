pub mod auth;
pub mod session;
pub mod store;

pub use auth::Authenticator;
pub use session::SessionAdapter;
pub use store::SubmissionStore;
