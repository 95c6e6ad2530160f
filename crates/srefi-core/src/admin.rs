use srefi_types::{Identity, SubmissionId, SubmissionRecord};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::export::CsvExport;
use crate::traits::{SessionAdapter, SubmissionStore};
use crate::{Result, SrefiError};

/// Case-insensitive substring match on the talent. An empty needle matches
/// everything.
pub fn matches_talent(record: &SubmissionRecord, needle: &str) -> bool {
    needle.is_empty() || record.talent.to_lowercase().contains(&needle.to_lowercase())
}

/// Records whose talent matches `needle`, in their original order.
pub fn filter_by_talent<'a, I>(records: I, needle: &str) -> Vec<&'a SubmissionRecord>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    records
        .into_iter()
        .filter(|record| matches_talent(record, needle))
        .collect()
}

/// What the administrator page renders.
#[derive(Debug, PartialEq)]
pub enum AdminView<'a> {
    /// Only the login/register form; no submission data.
    Login,
    Dashboard {
        identity: Identity,
        filter: &'a str,
        visible: Vec<&'a SubmissionRecord>,
    },
}

/// Administrator flow over the submission store, gated on the session.
pub struct AdminFlow {
    store: Arc<dyn SubmissionStore>,
    session: Arc<dyn SessionAdapter>,
    records: Vec<SubmissionRecord>,
    filter: String,
}

impl AdminFlow {
    pub fn new(store: Arc<dyn SubmissionStore>, session: Arc<dyn SessionAdapter>) -> Self {
        Self {
            store,
            session,
            records: Vec::new(),
            filter: String::new(),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session.current_identity()
    }

    fn require_identity(&self) -> Result<Identity> {
        self.session
            .current_identity()
            .ok_or(SrefiError::Unauthenticated)
    }

    pub fn view(&self) -> AdminView<'_> {
        match self.session.current_identity() {
            None => AdminView::Login,
            Some(identity) => AdminView::Dashboard {
                identity,
                filter: &self.filter,
                visible: self.visible(),
            },
        }
    }

    /// Replace the held records with the store's full current set. On
    /// failure the previous set is kept.
    pub async fn refresh(&mut self) -> Result<()> {
        self.require_identity()?;

        match self.store.list_all().await {
            Ok(records) => {
                debug!(count = records.len(), "Submissions refreshed");
                self.records = records;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error fetching submissions");
                Err(e)
            }
        }
    }

    pub fn set_filter(&mut self, needle: impl Into<String>) {
        self.filter = needle.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// All records from the last refresh.
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn visible(&self) -> Vec<&SubmissionRecord> {
        filter_by_talent(&self.records, &self.filter)
    }

    /// Delete in the store, then resynchronize. The local set is never
    /// edited directly.
    pub async fn delete(&mut self, id: &SubmissionId) -> Result<()> {
        self.require_identity()?;

        if let Err(e) = self.store.delete_by_id(id).await {
            error!(record_id = %id, error = %e, "Error deleting submission");
            return Err(e);
        }
        info!(record_id = %id, "Submission removed by administrator");

        self.refresh().await
    }

    pub fn export_csv(&self) -> Result<CsvExport> {
        self.require_identity()?;

        let visible = self.visible();
        debug!(rows = visible.len(), filter = %self.filter, "Exporting submissions");
        CsvExport::from_records(visible)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        self.session.login(email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Identity> {
        self.session.register(email, password).await
    }

    /// Sign out and drop the held records.
    pub async fn logout(&mut self) -> Result<()> {
        self.session.logout().await?;
        self.records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::tests::UnavailableStore;
    use crate::session::tests::FixedAuthenticator;
    use crate::session::SessionContext;
    use crate::store::MemorySubmissionStore;
    use srefi_types::NewSubmission;

    async fn seeded_store() -> Arc<MemorySubmissionStore> {
        let store = Arc::new(MemorySubmissionStore::new());
        for (name, talent) in [("Ana", "koken"), ("Bob", "planten"), ("Cas", "Kokende")] {
            store
                .create(NewSubmission::new(name, talent, crate::lookup(talent)))
                .await
                .unwrap();
        }
        store
    }

    fn signed_in() -> Arc<dyn SessionAdapter> {
        Arc::new(SessionContext::restore(
            Arc::new(FixedAuthenticator),
            Identity::new("uid-1", "beheer@srefi.nl"),
        ))
    }

    fn signed_out() -> Arc<dyn SessionAdapter> {
        Arc::new(SessionContext::new(Arc::new(FixedAuthenticator)))
    }

    fn names(records: &[&SubmissionRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_unauthenticated_sees_login_only() {
        let mut flow = AdminFlow::new(seeded_store().await, signed_out());

        assert_eq!(flow.view(), AdminView::Login);
        assert!(matches!(flow.refresh().await, Err(SrefiError::Unauthenticated)));
        assert!(matches!(flow.export_csv(), Err(SrefiError::Unauthenticated)));
        assert!(flow.records().is_empty());
    }

    #[tokio::test]
    async fn test_login_opens_dashboard() {
        let mut flow = AdminFlow::new(seeded_store().await, signed_out());

        flow.login("beheer@srefi.nl", "geheim123").await.unwrap();
        flow.refresh().await.unwrap();

        match flow.view() {
            AdminView::Dashboard { identity, visible, .. } => {
                assert_eq!(identity.uid, "uid-1");
                assert_eq!(visible.len(), 3);
            }
            AdminView::Login => panic!("expected dashboard"),
        }
    }

    #[tokio::test]
    async fn test_empty_filter_yields_all_in_order() {
        let mut flow = AdminFlow::new(seeded_store().await, signed_in());
        flow.refresh().await.unwrap();
        flow.set_filter("");

        assert_eq!(names(&flow.visible()), vec!["Ana", "Bob", "Cas"]);
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive_substring() {
        let mut flow = AdminFlow::new(seeded_store().await, signed_in());
        flow.refresh().await.unwrap();

        flow.set_filter("KOK");
        assert_eq!(names(&flow.visible()), vec!["Ana", "Cas"]);

        flow.set_filter("plant");
        assert_eq!(names(&flow.visible()), vec!["Bob"]);

        flow.set_filter("zingen");
        assert!(flow.visible().is_empty());
    }

    #[tokio::test]
    async fn test_filter_is_idempotent() {
        let mut flow = AdminFlow::new(seeded_store().await, signed_in());
        flow.refresh().await.unwrap();
        flow.set_filter("ko");

        let once = flow.visible();
        let twice = filter_by_talent(once.iter().copied(), "ko");
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_refresh_replaces_set() {
        let store = seeded_store().await;
        let mut flow = AdminFlow::new(store.clone(), signed_in());
        flow.refresh().await.unwrap();
        assert_eq!(flow.records().len(), 3);

        store
            .create(NewSubmission::new("Dex", "helpen", crate::lookup("helpen")))
            .await
            .unwrap();
        assert_eq!(flow.records().len(), 3);

        flow.refresh().await.unwrap();
        assert_eq!(flow.records().len(), 4);
    }

    #[tokio::test]
    async fn test_delete_then_refresh_omits_record() {
        let store = seeded_store().await;
        let mut flow = AdminFlow::new(store.clone(), signed_in());
        flow.refresh().await.unwrap();
        let target = flow.records()[1].id.clone();

        flow.delete(&target).await.unwrap();
        assert!(flow.records().iter().all(|r| r.id != target));

        flow.refresh().await.unwrap();
        assert!(flow.records().iter().all(|r| r.id != target));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_local_set() {
        let mut flow = AdminFlow::new(Arc::new(UnavailableStore), signed_in());

        let result = flow.delete(&SubmissionId::new("x")).await;
        assert!(result.is_err());
        assert!(flow.records().is_empty());
    }

    #[tokio::test]
    async fn test_export_follows_filter() {
        let store = Arc::new(MemorySubmissionStore::new());
        store
            .create(NewSubmission::new("Ana", "koken", crate::lookup("koken")))
            .await
            .unwrap();
        store
            .create(NewSubmission::new("Bob", "planten", crate::lookup("planten")))
            .await
            .unwrap();
        let mut flow = AdminFlow::new(store, signed_in());
        flow.refresh().await.unwrap();

        let all = String::from_utf8(flow.export_csv().unwrap().bytes).unwrap();
        let lines: Vec<&str> = all.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Ana,koken,"));
        assert!(lines[2].starts_with("Bob,planten,"));

        flow.set_filter("koken");
        let filtered = String::from_utf8(flow.export_csv().unwrap().bytes).unwrap();
        assert_eq!(
            filtered,
            "Naam,Talent,Suggesties\nAna,koken,\"Kook mee in buurtcentrum; Start je eigen catering; Vrijwillige kookhulp\""
        );
    }

    #[tokio::test]
    async fn test_export_of_empty_set() {
        let mut flow = AdminFlow::new(Arc::new(MemorySubmissionStore::new()), signed_in());
        flow.refresh().await.unwrap();

        let export = flow.export_csv().unwrap();
        assert_eq!(export.bytes, b"Naam,Talent,Suggesties\n");
        assert_eq!(export.filename, "inzendingen.csv");
    }

    #[tokio::test]
    async fn test_logout_clears_records() {
        let mut flow = AdminFlow::new(seeded_store().await, signed_in());
        flow.refresh().await.unwrap();

        flow.logout().await.unwrap();

        assert!(flow.records().is_empty());
        assert_eq!(flow.view(), AdminView::Login);
    }
}
