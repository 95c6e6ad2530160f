pub mod identity;
pub mod submission;

pub use identity::Identity;
pub use submission::{NewSubmission, SubmissionId, SubmissionRecord};
