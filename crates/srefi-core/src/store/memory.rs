use async_trait::async_trait;
use srefi_types::{NewSubmission, SubmissionId, SubmissionRecord};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::traits::SubmissionStore;
use crate::Result;

/// In-memory submission store (development and tests).
#[derive(Clone, Default)]
pub struct MemorySubmissionStore {
    records: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn create(&self, submission: NewSubmission) -> Result<SubmissionRecord> {
        let record = submission.into_record(SubmissionId::generate());
        self.records.write().await.push(record.clone());
        debug!(record_id = %record.id, "Submission stored in memory");
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<SubmissionRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn delete_by_id(&self, id: &SubmissionId) -> Result<()> {
        self.records.write().await.retain(|record| &record.id != id);
        Ok(())
    }
}
