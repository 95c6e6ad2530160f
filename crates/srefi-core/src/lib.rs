pub mod admin;
pub mod entity;
pub mod error;
pub mod export;
pub mod observer;
pub mod participant;
pub mod session;
pub mod store;
pub mod suggestion;
pub mod traits;

pub use admin::{matches_talent, filter_by_talent, AdminFlow, AdminView};
pub use error::{Result, SrefiError};
pub use export::{CsvExport, EXPORT_FILENAME};
pub use observer::{IdentityObservers, SubscriptionId};
pub use participant::{ParticipantFlow, ParticipantState, SubmitOutcome};
pub use session::SessionContext;
pub use store::{DatabaseSubmissionStore, MemorySubmissionStore};
pub use suggestion::{lookup, SuggestionTable};
pub use traits::{Authenticator, SessionAdapter, SubmissionStore};
