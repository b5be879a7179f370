//! Identity rules shared by every path that creates or renames an account.
//!
//! Format problems and duplicates are reported with the same wording the
//! account forms display. Duplicates on their own surface as a conflict,
//! anything else as a validation failure carrying every message.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::domain::{Account, NewAccount, Password, PasswordPolicy};
use crate::errors::{AppError, AppResult};
use crate::infra::AccountRepository;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-._@+]+$").expect("username pattern is valid"));

/// Messages collected while checking a candidate identity
#[derive(Debug, Default)]
pub(crate) struct IdentityErrors {
    invalid: Vec<String>,
    taken: Vec<String>,
}

impl IdentityErrors {
    pub(crate) fn is_empty(&self) -> bool {
        self.invalid.is_empty() && self.taken.is_empty()
    }

    pub(crate) fn invalid(&mut self, message: impl Into<String>) {
        self.invalid.push(message.into());
    }

    pub(crate) fn extend_invalid(&mut self, messages: Vec<String>) {
        self.invalid.extend(messages);
    }

    fn taken(&mut self, message: String) {
        self.taken.push(message);
    }

    pub(crate) fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        if self.invalid.is_empty() {
            return Err(AppError::Conflict(self.taken));
        }

        let mut messages = self.invalid;
        messages.extend(self.taken);
        Err(AppError::Validation(messages))
    }
}

pub(crate) fn validate_username_format(username: &str, errors: &mut IdentityErrors) {
    if !USERNAME_PATTERN.is_match(username) {
        errors.invalid(format!(
            "Username '{}' is invalid, can only contain letters or digits.",
            username
        ));
    }
}

pub(crate) fn validate_email_format(email: &str, errors: &mut IdentityErrors) {
    if !email.validate_email() {
        errors.invalid(format!("Email '{}' is invalid.", email));
    }
}

/// Record a duplicate when another account already uses the username
pub(crate) async fn check_username_free(
    repo: &dyn AccountRepository,
    username: &str,
    owner: Option<Uuid>,
    errors: &mut IdentityErrors,
) -> AppResult<()> {
    if username.is_empty() {
        return Ok(());
    }
    if let Some(existing) = repo.find_by_username(username).await? {
        if Some(existing.id) != owner {
            errors.taken(format!("Username '{}' is already taken.", username));
        }
    }
    Ok(())
}

/// Record a duplicate when another account already uses the email
pub(crate) async fn check_email_free(
    repo: &dyn AccountRepository,
    email: &str,
    owner: Option<Uuid>,
    errors: &mut IdentityErrors,
) -> AppResult<()> {
    if email.is_empty() {
        return Ok(());
    }
    if let Some(existing) = repo.find_by_email(email).await? {
        if Some(existing.id) != owner {
            errors.taken(format!("Email '{}' is already taken.", email));
        }
    }
    Ok(())
}

/// Validate and insert a new account holding no roles.
pub(crate) async fn create_account(
    repo: &dyn AccountRepository,
    username: &str,
    email: &str,
    password: &str,
) -> AppResult<Account> {
    let mut errors = IdentityErrors::default();
    validate_username_format(username, &mut errors);
    validate_email_format(email, &mut errors);
    check_username_free(repo, username, None, &mut errors).await?;
    check_email_free(repo, email, None, &mut errors).await?;
    errors.extend_invalid(PasswordPolicy::default().violations(password));
    errors.into_result()?;

    let password_hash = Password::new(password)?.into_string();
    repo.create(NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
    })
    .await
}
