use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::AdminSession;

/// Where live administrator sessions are kept, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: AdminSession) -> Result<()>;

    async fn get(&self, session_id: &str) -> Result<Option<AdminSession>>;

    /// Mark the session active now. `false` if it is gone.
    async fn touch(&self, session_id: &str) -> Result<bool>;

    async fn remove(&self, session_id: &str) -> Result<Option<AdminSession>>;

    /// Drop every session idle for longer than `ttl`; returns how many.
    async fn purge_idle(&self, ttl: Duration) -> Result<usize>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: AdminSession) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session);
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<AdminSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn touch(&self, session_id: &str) -> Result<bool> {
        match self.sessions.write().await.get_mut(session_id) {
            Some(session) => {
                session.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, session_id: &str) -> Result<Option<AdminSession>> {
        Ok(self.sessions.write().await.remove(session_id))
    }

    async fn purge_idle(&self, ttl: Duration) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(ttl));
        Ok(before - sessions.len())
    }
}
