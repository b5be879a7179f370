//! Bootstrap of the Administrator role and the default administrator.

use std::sync::Arc;

use super::identity;
use crate::config::SeedAdmin;
use crate::domain::Role;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// What a seeding run changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub role_created: bool,
    pub admin_created: bool,
}

/// Idempotent seeding step, guarded by existence checks.
pub struct Seeder<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Seeder<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    pub async fn seed_default_admin(&self, admin: &SeedAdmin) -> AppResult<SeedReport> {
        let accounts = self.uow.accounts();
        let mut report = SeedReport {
            role_created: false,
            admin_created: false,
        };

        if !accounts.role_exists(Role::Administrator).await? {
            accounts.create_role(Role::Administrator).await?;
            report.role_created = true;
        }

        // A renamed default administrator still holds the seeded email
        let existing = match accounts.find_by_username(&admin.username).await? {
            Some(account) => Some(account),
            None => accounts.find_by_email(&admin.email).await?,
        };

        match existing {
            Some(account) if account.username != admin.username => {
                tracing::warn!(
                    username = %account.username,
                    email = %admin.email,
                    "Default administrator email already in use; skipping creation"
                );
            }
            Some(_) => {
                tracing::debug!(username = %admin.username, "Default administrator already present");
            }
            None => {
                let account = identity::create_account(
                    accounts.as_ref(),
                    &admin.username,
                    &admin.email,
                    admin.password(),
                )
                .await?;
                accounts.add_to_role(account.id, Role::Administrator).await?;
                report.admin_created = true;
                tracing::info!(username = %account.username, email = %account.email, "Default administrator created");
            }
        }

        Ok(report)
    }
}
