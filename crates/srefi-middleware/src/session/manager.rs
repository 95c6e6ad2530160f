use anyhow::Result;
use srefi_types::Identity;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{AdminSession, SessionStore};

const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Opens, resolves and closes administrator sessions. Sessions idle for
/// longer than the ttl are refused and swept in the background.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    idle_ttl: Duration,
}

impl SessionManager {
    /// Must be called inside a tokio runtime.
    pub fn new(store: Arc<dyn SessionStore>, idle_ttl: Duration) -> Self {
        tokio::spawn(sweep_idle(store.clone(), idle_ttl));
        Self { store, idle_ttl }
    }

    pub async fn open(&self, identity: &Identity) -> Result<AdminSession> {
        let session = AdminSession::open(identity);
        self.store.insert(session.clone()).await?;

        info!(session_id = %session.session_id, uid = %session.uid, "Session opened");
        Ok(session)
    }

    /// Identity behind a token's session, or `None` if the session is gone,
    /// idle, or owned by another account. A resolved session counts as
    /// active.
    pub async fn resolve(&self, session_id: &str, uid: &str) -> Result<Option<Identity>> {
        let session = match self.store.get(session_id).await? {
            Some(session) => session,
            None => return Ok(None),
        };

        if !session.belongs_to(uid) {
            warn!(session_id = session_id, uid = uid, "Session presented by another account");
            return Ok(None);
        }

        if session.is_idle(self.idle_ttl) {
            self.store.remove(session_id).await?;
            debug!(session_id = session_id, "Idle session closed");
            return Ok(None);
        }

        self.store.touch(session_id).await?;
        Ok(Some(session.identity()))
    }

    /// Returns `false` if the session was already gone.
    pub async fn close(&self, session_id: &str) -> Result<bool> {
        match self.store.remove(session_id).await? {
            Some(session) => {
                info!(session_id = session_id, uid = %session.uid, "Session closed");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

async fn sweep_idle(store: Arc<dyn SessionStore>, idle_ttl: Duration) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        interval.tick().await;

        match store.purge_idle(idle_ttl).await {
            Ok(0) => {}
            Ok(purged) => info!(purged = purged, "Idle sessions swept"),
            Err(e) => error!(error = %e, "Failed to sweep idle sessions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn manager(store: Arc<MemorySessionStore>, ttl_secs: u64) -> SessionManager {
        SessionManager::new(store, Duration::from_secs(ttl_secs))
    }

    #[tokio::test]
    async fn test_open_resolve_close() {
        let sessions = manager(Arc::new(MemorySessionStore::new()), 3600);
        let identity = Identity::new("uid-1", "beheer@srefi.nl");

        let session = sessions.open(&identity).await.unwrap();
        let resolved = sessions.resolve(&session.session_id, "uid-1").await.unwrap();
        assert_eq!(resolved, Some(identity));

        assert!(sessions.close(&session.session_id).await.unwrap());
        assert!(!sessions.close(&session.session_id).await.unwrap());
        assert!(sessions
            .resolve(&session.session_id, "uid-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_other_account_cannot_resolve() {
        let sessions = manager(Arc::new(MemorySessionStore::new()), 3600);
        let session = sessions
            .open(&Identity::new("uid-2", "c@d.nl"))
            .await
            .unwrap();

        let resolved = sessions.resolve(&session.session_id, "uid-1").await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_idle_session_is_closed_on_resolve() {
        let store = Arc::new(MemorySessionStore::new());
        let sessions = manager(store.clone(), 60);

        let mut session = AdminSession::open(&Identity::new("uid-1", "a@b.nl"));
        session.last_active = chrono::Utc::now() - chrono::Duration::minutes(5);
        let session_id = session.session_id.clone();
        store.insert(session).await.unwrap();

        assert!(sessions.resolve(&session_id, "uid-1").await.unwrap().is_none());
        assert!(store.get(&session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_marks_session_active() {
        let store = Arc::new(MemorySessionStore::new());
        let sessions = manager(store.clone(), 3600);

        let mut session = AdminSession::open(&Identity::new("uid-1", "a@b.nl"));
        let earlier = chrono::Utc::now() - chrono::Duration::minutes(30);
        session.last_active = earlier;
        let session_id = session.session_id.clone();
        store.insert(session).await.unwrap();

        sessions.resolve(&session_id, "uid-1").await.unwrap();

        let refreshed = store.get(&session_id).await.unwrap().unwrap();
        assert!(refreshed.last_active > earlier);
    }
}
