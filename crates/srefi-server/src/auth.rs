use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use srefi_core::entity::accounts;
use srefi_core::entity::prelude::*;
use srefi_core::{Authenticator, Result, SrefiError};
use srefi_middleware::PasswordHasher;
use srefi_types::Identity;
use tracing::{info, warn};

const MIN_PASSWORD_LEN: usize = 6;

/// Email/password accounts stored in the `accounts` table.
pub struct DbAuthenticator {
    db: DatabaseConnection,
    hasher: PasswordHasher,
}

impl DbAuthenticator {
    pub fn new(db: DatabaseConnection, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<accounts::Model>> {
        Ok(Accounts::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(SrefiError::invalid_input("Invalid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SrefiError::invalid_input(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[async_trait]
impl Authenticator for DbAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let account = match self.find_by_email(email).await? {
            Some(account) => account,
            None => {
                warn!(email = %email, "Sign-in for unknown account");
                return Err(SrefiError::auth("Invalid email or password"));
            }
        };

        if !self.hasher.verify(password, &account.password_hash).await? {
            warn!(uid = %account.uid, "Sign-in with wrong password");
            return Err(SrefiError::auth("Invalid email or password"));
        }

        Ok(Identity::new(account.uid, account.email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        validate_credentials(email, password)?;

        if self.find_by_email(email).await?.is_some() {
            return Err(SrefiError::Conflict(format!("Account already exists: {}", email)));
        }

        let uid = uuid::Uuid::new_v4().to_string();
        let password_hash = self.hasher.hash(password).await?;

        let account = accounts::ActiveModel {
            uid: Set(uid.clone()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
        };
        account.insert(&self.db).await?;

        info!(uid = %uid, "Account created");
        Ok(Identity::new(uid, email))
    }
}
