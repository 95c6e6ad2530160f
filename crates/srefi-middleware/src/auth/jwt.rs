use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Issues and verifies administrator tokens.
pub struct JwtAuth {
    secret: Arc<String>,
    expiration: Duration,
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // account uid
    pub email: String,
    pub sid: String,   // server session id
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl JwtAuth {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret: Arc::new(secret),
            expiration: Duration::hours(expiration_hours),
        }
    }

    pub fn generate_token(&self, user_id: &str, email: &str, session_id: &str) -> Result<String> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            sid: session_id.to_string(),
            exp,
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Checks signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn is_expired(&self, claims: &Claims) -> bool {
        let now = Utc::now().timestamp();
        claims.exp < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify_token() {
        let auth = JwtAuth::new("test-secret".to_string(), 1);

        let token = auth.generate_token("uid-1", "beheer@srefi.nl", "sess-1").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email, "beheer@srefi.nl");
        assert_eq!(claims.sid, "sess-1");
        assert!(!auth.is_expired(&claims));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtAuth::new("one".to_string(), 1);
        let verifier = JwtAuth::new("two".to_string(), 1);

        let token = issuer.generate_token("uid-1", "a@b.nl", "sess-1").unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let auth = JwtAuth::new("test-secret".to_string(), 1);

        let result = auth.verify_token("invalid-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // past the default 60s leeway
        let auth = JwtAuth::new("test-secret".to_string(), -1);
        let token = auth.generate_token("uid-1", "a@b.nl", "sess-1").unwrap();
        assert!(auth.verify_token(&token).is_err());
    }
}
