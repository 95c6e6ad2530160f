pub mod data;
pub mod manager;
pub mod store;

pub use data::AdminSession;
pub use manager::SessionManager;
pub use store::{MemorySessionStore, SessionStore};
