//! Authentication service - credential checks and session tokens.
//!
//! Sessions are stateless: a signed token carries the account id and its
//! roles, and signing out simply discards it. Authorization always reloads
//! the account, so deleted accounts and revoked roles take effect at once.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Account, Password, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Verified against when the email is unknown so both paths cost the same
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("Dummy#Passw0rd")
        .map(Password::into_string)
        .unwrap_or_default()
});

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
    pub exp: i64,
    pub iat: i64,
}

/// Signed session issued after a successful login
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub account_id: Uuid,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials by email and issue a session
    async fn login(&self, email: String, password: String) -> AppResult<SessionToken>;

    /// Verify a session token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Verify a session token and load the account it names.
    ///
    /// Fails with `Unauthorized` when the account no longer exists.
    async fn authenticate(&self, token: &str) -> AppResult<Account>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    fn issue(&self, account: &Account) -> AppResult<SessionToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: account.id,
            username: account.username.clone(),
            roles: account.roles.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(SessionToken {
            token,
            account_id: account.id,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<SessionToken> {
        let found = self.uow.accounts().find_by_email(&email).await?;

        let stored = Password::from_hash(match &found {
            Some(account) => account.password_hash.clone(),
            None => DUMMY_HASH.clone(),
        });
        let password_valid = stored.verify(&password);

        match found {
            Some(account) if password_valid => {
                tracing::info!(account_id = %account.id, "Login succeeded");
                self.issue(&account)
            }
            _ => {
                tracing::info!("Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn authenticate(&self, token: &str) -> AppResult<Account> {
        let claims = self.verify_token(token)?;

        match self.uow.accounts().find_by_id(claims.sub).await? {
            Some(account) => Ok(account),
            None => {
                tracing::warn!(account_id = %claims.sub, "Session names a missing account");
                Err(AppError::Unauthorized)
            }
        }
    }
}
