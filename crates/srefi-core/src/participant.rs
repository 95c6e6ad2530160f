use srefi_types::{NewSubmission, SubmissionRecord};
use std::sync::Arc;
use tracing::{error, info};

use crate::suggestion::SuggestionTable;
use crate::traits::SubmissionStore;
use crate::{Result, SrefiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantState {
    Composing,
    /// Terminal for this flow instance.
    Submitted,
}

impl ParticipantState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantState::Composing => "composing",
            ParticipantState::Submitted => "submitted",
        }
    }
}

/// Result of a submit: the suggestions are always available, persistence
/// may have failed.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub suggestions: Vec<String>,
    pub persisted: Result<SubmissionRecord>,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        self.persisted.is_ok()
    }
}

/// One participant's pass through the form.
pub struct ParticipantFlow {
    store: Arc<dyn SubmissionStore>,
    table: SuggestionTable,
    state: ParticipantState,
    suggestions: Vec<String>,
}

impl ParticipantFlow {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self::with_table(store, SuggestionTable::builtin())
    }

    pub fn with_table(store: Arc<dyn SubmissionStore>, table: SuggestionTable) -> Self {
        Self {
            store,
            table,
            state: ParticipantState::Composing,
            suggestions: Vec::new(),
        }
    }

    pub fn state(&self) -> ParticipantState {
        self.state
    }

    /// Suggestions from the last submit, shown whether or not it was stored.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Resolve suggestions and try once to persist the submission.
    ///
    /// A persistence failure is logged and reported in the outcome; the
    /// flow then stays in `Composing`. Only a second submit after success is
    /// an error.
    pub async fn submit(&mut self, name: &str, talent: &str) -> Result<SubmitOutcome> {
        if self.state == ParticipantState::Submitted {
            return Err(SrefiError::AlreadySubmitted);
        }

        let suggestions = self.table.lookup(talent);
        self.suggestions = suggestions.clone();

        let submission = NewSubmission::new(name, talent, suggestions.clone());
        let persisted = self.store.create(submission).await;

        match &persisted {
            Ok(record) => {
                self.state = ParticipantState::Submitted;
                info!(record_id = %record.id, "Participant submission saved");
            }
            Err(e) => {
                error!(error = %e, talent = %talent, "Error saving submission");
            }
        }

        Ok(SubmitOutcome {
            suggestions,
            persisted,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::MemorySubmissionStore;
    use async_trait::async_trait;
    use srefi_types::SubmissionId;

    /// Store whose every call fails.
    pub(crate) struct UnavailableStore;

    #[async_trait]
    impl SubmissionStore for UnavailableStore {
        async fn create(&self, _submission: NewSubmission) -> Result<SubmissionRecord> {
            Err(SrefiError::internal("store unavailable"))
        }

        async fn list_all(&self) -> Result<Vec<SubmissionRecord>> {
            Err(SrefiError::internal("store unavailable"))
        }

        async fn delete_by_id(&self, _id: &SubmissionId) -> Result<()> {
            Err(SrefiError::internal("store unavailable"))
        }
    }

    #[tokio::test]
    async fn test_submit_persists_and_transitions() {
        let store = Arc::new(MemorySubmissionStore::new());
        let mut flow = ParticipantFlow::new(store.clone());
        assert_eq!(flow.state(), ParticipantState::Composing);

        let outcome = flow.submit("Ana", "koken").await.unwrap();

        assert!(outcome.is_saved());
        assert_eq!(outcome.suggestions, crate::lookup("koken"));
        assert_eq!(flow.state(), ParticipantState::Submitted);

        let stored = store.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Ana");
        assert_eq!(stored[0].talent, "koken");
        assert_eq!(stored[0].suggestions, outcome.suggestions);
    }

    #[tokio::test]
    async fn test_failed_write_still_shows_suggestions() {
        let mut flow = ParticipantFlow::new(Arc::new(UnavailableStore));

        let outcome = flow.submit("Ana", "Planten").await.unwrap();

        assert!(!outcome.is_saved());
        assert_eq!(outcome.suggestions, crate::lookup("planten"));
        assert_eq!(flow.suggestions(), outcome.suggestions.as_slice());
        assert_eq!(flow.state(), ParticipantState::Composing);
    }

    #[tokio::test]
    async fn test_unmatched_talent_stores_default() {
        let store = Arc::new(MemorySubmissionStore::new());
        let mut flow = ParticipantFlow::new(store.clone());

        let outcome = flow.submit("Cas", "zingen").await.unwrap();

        assert_eq!(
            outcome.suggestions,
            vec!["Geen suggesties gevonden. Probeer iets anders."]
        );
        assert_eq!(store.list_all().await.unwrap()[0].suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_second_submit_rejected() {
        let store = Arc::new(MemorySubmissionStore::new());
        let mut flow = ParticipantFlow::new(store.clone());
        flow.submit("Ana", "koken").await.unwrap();

        let again = flow.submit("Ana", "koken").await;
        assert!(matches!(again, Err(SrefiError::AlreadySubmitted)));
        assert_eq!(store.len().await, 1);

        // a fresh instance starts composing again
        let mut fresh = ParticipantFlow::new(store.clone());
        assert_eq!(fresh.state(), ParticipantState::Composing);
        fresh.submit("Ana", "koken").await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
