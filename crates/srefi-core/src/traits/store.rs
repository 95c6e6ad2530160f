use async_trait::async_trait;
use srefi_types::{NewSubmission, SubmissionId, SubmissionRecord};

use crate::Result;

/// Persistence boundary for submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a new record; the store assigns the id.
    async fn create(&self, submission: NewSubmission) -> Result<SubmissionRecord>;

    /// Every stored record, in insertion order.
    async fn list_all(&self) -> Result<Vec<SubmissionRecord>>;

    /// Remove one record. Removing an unknown id is not an error.
    async fn delete_by_id(&self, id: &SubmissionId) -> Result<()>;
}
