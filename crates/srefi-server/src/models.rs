use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use srefi_core::SubmitOutcome;
use srefi_types::{Identity, SubmissionRecord};

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub talent: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub talent: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub talent: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub state: &'static str,
    pub suggestions: Vec<String>,
    /// `false` when the record could not be stored
    pub saved: bool,
    pub id: Option<String>,
}

impl SubmitResponse {
    pub fn new(state: &'static str, outcome: SubmitOutcome) -> Self {
        let id = outcome
            .persisted
            .as_ref()
            .ok()
            .map(|record| record.id.to_string());
        Self {
            state,
            saved: id.is_some(),
            suggestions: outcome.suggestions,
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub uid: String,
    pub email: String,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            uid: identity.uid,
            email: identity.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub talent: String,
}

/// One row of the administrator table.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub name: String,
    pub talent: String,
    pub suggestions: Vec<String>,
    pub suggestions_display: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&SubmissionRecord> for SubmissionResponse {
    fn from(record: &SubmissionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            talent: record.talent.clone(),
            suggestions: record.suggestions.clone(),
            suggestions_display: record.suggestions_display(),
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub filter: String,
    /// Stored records before filtering
    pub total: usize,
    pub records: Vec<SubmissionResponse>,
}
