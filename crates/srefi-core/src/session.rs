use async_trait::async_trait;
use srefi_types::Identity;
use std::sync::Arc;
use tracing::{info, warn};

use crate::observer::{IdentityCallback, IdentityObservers, SubscriptionId};
use crate::traits::{Authenticator, SessionAdapter};
use crate::Result;

/// Explicit session state handed to a flow instead of a process-wide
/// singleton.
pub struct SessionContext {
    authenticator: Arc<dyn Authenticator>,
    observers: IdentityObservers,
}

impl SessionContext {
    /// Unauthenticated context.
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            observers: IdentityObservers::default(),
        }
    }

    /// Context for an identity that was already verified elsewhere, e.g.
    /// from a bearer token.
    pub fn restore(authenticator: Arc<dyn Authenticator>, identity: Identity) -> Self {
        Self {
            authenticator,
            observers: IdentityObservers::new(Some(identity)),
        }
    }
}

#[async_trait]
impl SessionAdapter for SessionContext {
    fn current_identity(&self) -> Option<Identity> {
        self.observers.current()
    }

    async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        match self.authenticator.sign_in(email, password).await {
            Ok(identity) => {
                info!(uid = %identity.uid, "Administrator signed in");
                self.observers.set(Some(identity.clone()));
                Ok(identity)
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Sign-in rejected");
                Err(e)
            }
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<Identity> {
        match self.authenticator.sign_up(email, password).await {
            Ok(identity) => {
                info!(uid = %identity.uid, "Administrator registered");
                self.observers.set(Some(identity.clone()));
                Ok(identity)
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Registration rejected");
                Err(e)
            }
        }
    }

    async fn logout(&self) -> Result<()> {
        if let Some(identity) = self.observers.current() {
            info!(uid = %identity.uid, "Administrator signed out");
        }
        self.observers.set(None);
        Ok(())
    }

    fn subscribe(&self, callback: IdentityCallback) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
