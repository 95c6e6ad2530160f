use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use srefi_types::Identity;
use std::time::Duration;

/// Server-side half of an administrator token. A token is only honoured
/// while its session exists and belongs to the token's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub session_id: String,

    /// Account uid
    pub uid: String,

    pub email: String,

    pub created_at: DateTime<Utc>,

    pub last_active: DateTime<Utc>,
}

impl AdminSession {
    pub fn open(identity: &Identity) -> Self {
        let now = Utc::now();
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            created_at: now,
            last_active: now,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.uid.as_str(), self.email.as_str())
    }

    pub fn belongs_to(&self, uid: &str) -> bool {
        self.uid == uid
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// No request for longer than `ttl`.
    pub fn is_idle(&self, ttl: Duration) -> bool {
        let idle = Utc::now().signed_duration_since(self.last_active);
        idle.num_milliseconds() > ttl.as_millis() as i64
    }
}
