use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Store-assigned identifier of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SubmissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SubmissionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A submission that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    pub talent: String,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewSubmission {
    /// Captures the current time as the submission timestamp.
    pub fn new(name: impl Into<String>, talent: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            talent: talent.into(),
            suggestions,
            timestamp: Utc::now(),
        }
    }

    /// Attaches the identifier the store assigned on write.
    pub fn into_record(self, id: SubmissionId) -> SubmissionRecord {
        SubmissionRecord {
            id,
            name: self.name,
            talent: self.talent,
            suggestions: self.suggestions,
            timestamp: self.timestamp,
        }
    }
}

/// A persisted submission.
///
/// Records are never updated in place; identity is the `id` alone, so two
/// records compare equal whenever their ids do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub name: String,
    pub talent: String,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Suggestions as shown in the admin list.
    pub fn suggestions_display(&self) -> String {
        self.suggestions.join(", ")
    }
}

impl PartialEq for SubmissionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SubmissionRecord {}

impl Hash for SubmissionRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
