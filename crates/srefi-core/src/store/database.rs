use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use srefi_types::{NewSubmission, SubmissionId, SubmissionRecord};
use tracing::{debug, info};

use crate::entity::submissions;
use crate::traits::SubmissionStore;
use crate::{Result, SrefiError};

impl TryFrom<submissions::Model> for SubmissionRecord {
    type Error = SrefiError;

    fn try_from(model: submissions::Model) -> Result<Self> {
        Ok(SubmissionRecord {
            id: SubmissionId::from(model.id),
            name: model.name,
            talent: model.talent,
            suggestions: serde_json::from_value(model.suggestions)?,
            timestamp: model.timestamp,
        })
    }
}

/// Submission store backed by a sea-orm connection (SQLite or Postgres).
pub struct DatabaseSubmissionStore {
    db: DatabaseConnection,
}

impl DatabaseSubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionStore for DatabaseSubmissionStore {
    async fn create(&self, submission: NewSubmission) -> Result<SubmissionRecord> {
        let id = SubmissionId::generate();

        let row = submissions::ActiveModel {
            id: Set(id.to_string()),
            name: Set(submission.name.clone()),
            talent: Set(submission.talent.clone()),
            suggestions: Set(serde_json::to_value(&submission.suggestions)?),
            timestamp: Set(submission.timestamp),
            ..Default::default()
        };
        row.insert(&self.db).await?;

        info!(record_id = %id, talent = %submission.talent, "Submission stored");
        Ok(submission.into_record(id))
    }

    async fn list_all(&self) -> Result<Vec<SubmissionRecord>> {
        let rows = submissions::Entity::find()
            .order_by_asc(submissions::Column::Seq)
            .all(&self.db)
            .await?;

        debug!(count = rows.len(), "Submissions listed from database");
        rows.into_iter().map(SubmissionRecord::try_from).collect()
    }

    async fn delete_by_id(&self, id: &SubmissionId) -> Result<()> {
        let result = submissions::Entity::delete_many()
            .filter(submissions::Column::Id.eq(id.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            debug!(record_id = %id, "Delete of unknown submission ignored");
        } else {
            info!(record_id = %id, "Submission deleted");
        }
        Ok(())
    }
}
