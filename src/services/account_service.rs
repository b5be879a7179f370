//! Account self-service - registration and everything an owner does to
//! their own account.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use std::sync::Arc;
use uuid::Uuid;

use super::identity::{self, IdentityErrors};
use crate::config::{MSG_NEW_PASSWORDS_DO_NOT_MATCH, MSG_PASSWORDS_DO_NOT_MATCH};
use crate::domain::{Account, LoginSummary, Password, PasswordPolicy, ProfileView};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile fields submitted by the owner.
///
/// Text fields and the picture are applied only when non-blank.
/// Availability is always written.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    /// Base64 image bytes, optionally wrapped in a data URI
    pub picture: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub is_available: bool,
}

/// Account service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Anonymous self-registration of a househelp account
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        confirm_password: Option<String>,
    ) -> AppResult<Account>;

    async fn view_profile(&self, account_id: Uuid) -> AppResult<ProfileView>;

    async fn edit_profile(&self, account_id: Uuid, edit: ProfileEdit) -> AppResult<ProfileView>;

    async fn change_password(
        &self,
        account_id: Uuid,
        current_password: String,
        new_password: String,
        confirm_password: String,
    ) -> AppResult<()>;

    /// Username and picture shown in the navigation bar
    async fn login_summary(&self, account_id: Uuid) -> AppResult<LoginSummary>;
}

/// Concrete implementation of AccountService using Unit of Work.
pub struct AccountManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AccountManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn load(&self, account_id: Uuid) -> AppResult<Account> {
        self.uow
            .accounts()
            .find_by_id(account_id)
            .await?
            .ok_or_not_found()
    }
}

/// Treat blank form values as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn decode_picture(encoded: &str) -> Option<Vec<u8>> {
    let payload = match encoded.strip_prefix("data:") {
        Some(uri) => uri.split_once(',').map(|(_, data)| data)?,
        None => encoded,
    };
    BASE64_STANDARD.decode(payload.trim()).ok()
}

#[async_trait]
impl<U: UnitOfWork> AccountService for AccountManager<U> {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        confirm_password: Option<String>,
    ) -> AppResult<Account> {
        if confirm_password.is_some_and(|confirm| confirm != password) {
            return Err(AppError::validation(MSG_PASSWORDS_DO_NOT_MATCH));
        }

        let account =
            identity::create_account(self.uow.accounts().as_ref(), &username, &email, &password)
                .await?;
        tracing::info!(account_id = %account.id, username = %account.username, "Househelp registered");
        Ok(account)
    }

    async fn view_profile(&self, account_id: Uuid) -> AppResult<ProfileView> {
        self.load(account_id).await.map(ProfileView::from)
    }

    async fn edit_profile(&self, account_id: Uuid, edit: ProfileEdit) -> AppResult<ProfileView> {
        let accounts = self.uow.accounts();
        let mut account = self.load(account_id).await?;
        let mut errors = IdentityErrors::default();

        if let Some(encoded) = present(edit.picture) {
            match decode_picture(&encoded) {
                Some(bytes) => account.profile_picture = Some(bytes),
                None => errors.invalid("Profile picture is not a valid base64 image."),
            }
        }

        if let Some(username) = present(edit.username) {
            identity::validate_username_format(&username, &mut errors);
            identity::check_username_free(accounts.as_ref(), &username, Some(account.id), &mut errors)
                .await?;
            account.username = username;
        }

        if let Some(name) = present(edit.name) {
            account.name = Some(name);
        }

        if let Some(description) = present(edit.description) {
            account.description = Some(description);
        }

        if let Some(email) = present(edit.email) {
            identity::validate_email_format(&email, &mut errors);
            identity::check_email_free(accounts.as_ref(), &email, Some(account.id), &mut errors)
                .await?;
            account.email = email;
        }

        account.is_available = edit.is_available;

        errors.into_result()?;

        let updated = accounts.update(account).await?;
        tracing::info!(account_id = %updated.id, available = updated.is_available, "Profile updated");
        Ok(ProfileView::from(updated))
    }

    async fn change_password(
        &self,
        account_id: Uuid,
        current_password: String,
        new_password: String,
        confirm_password: String,
    ) -> AppResult<()> {
        if new_password != confirm_password {
            return Err(AppError::validation(MSG_NEW_PASSWORDS_DO_NOT_MATCH));
        }

        let account = self.load(account_id).await?;
        if !Password::from_hash(account.password_hash).verify(&current_password) {
            tracing::warn!(account_id = %account.id, "Password change rejected");
            return Err(AppError::IncorrectPassword);
        }

        let violations = PasswordPolicy::default().violations(&new_password);
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow
            .accounts()
            .update_password(account.id, password_hash)
            .await?;

        tracing::info!(account_id = %account.id, "Password changed");
        Ok(())
    }

    async fn login_summary(&self, account_id: Uuid) -> AppResult<LoginSummary> {
        self.load(account_id).await.map(LoginSummary::from)
    }
}
