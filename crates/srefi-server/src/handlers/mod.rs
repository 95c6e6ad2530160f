pub mod admin;
pub mod auth;
pub mod submissions;
pub mod suggestions;

pub use admin::{delete_submission, export_submissions, list_submissions};
pub use auth::{login, logout, me, register};
pub use submissions::submit;
pub use suggestions::{keywords, suggest};
