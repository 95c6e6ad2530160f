use async_trait::async_trait;
use srefi_types::Identity;

use crate::Result;

/// Credential backend for administrator accounts.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify an email/password pair.
    ///
    /// # Returns
    /// * `Ok(identity)` if the credentials match an account.
    /// * `Err(SrefiError::Auth)` if they do not.
    /// * `Err(_)` for any other failure.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    /// Create an account and return its identity.
    ///
    /// # Returns
    /// * `Err(SrefiError::Conflict)` if the email is taken.
    /// * `Err(SrefiError::InvalidInput)` if the email or password is rejected.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;
}
