pub mod database;
pub mod memory;

pub use database::DatabaseSubmissionStore;
pub use memory::MemorySubmissionStore;
