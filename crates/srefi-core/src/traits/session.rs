use async_trait::async_trait;
use srefi_types::Identity;

use crate::observer::{IdentityCallback, SubscriptionId};
use crate::Result;

/// The administrator's view of the authentication provider.
#[async_trait]
pub trait SessionAdapter: Send + Sync {
    /// `None` while unauthenticated.
    fn current_identity(&self) -> Option<Identity>;

    async fn login(&self, email: &str, password: &str) -> Result<Identity>;

    async fn register(&self, email: &str, password: &str) -> Result<Identity>;

    async fn logout(&self) -> Result<()>;

    /// Register a callback for identity changes. It is invoked once right
    /// away with the current identity.
    fn subscribe(&self, callback: IdentityCallback) -> SubscriptionId;

    /// Returns `false` if `id` was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
