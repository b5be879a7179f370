//! Admin service - account management behind the Administrator role.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::identity;
use crate::config::{MSG_ACCOUNT_REMOVED, MSG_DELETE_FAILED, MSG_PASSWORDS_DO_NOT_MATCH, MSG_USER_NOT_FOUND};
use crate::domain::{Account, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::{AccountRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Result of creating an administrator.
///
/// The account is inserted before the role is granted, so a failure in
/// the second step leaves an ordinary account behind.
#[derive(Debug, Clone)]
pub enum AdminCreation {
    Created(Account),
    Unprivileged { account: Account, reason: String },
}

impl AdminCreation {
    pub fn account(&self) -> &Account {
        match self {
            AdminCreation::Created(account) | AdminCreation::Unprivileged { account, .. } => account,
        }
    }
}

/// Result of deleting an account; every outcome carries a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotFound,
    Failed,
}

impl DeleteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            DeleteOutcome::Removed => MSG_ACCOUNT_REMOVED,
            DeleteOutcome::NotFound => MSG_USER_NOT_FOUND,
            DeleteOutcome::Failed => MSG_DELETE_FAILED,
        }
    }
}

/// Aggregate counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SystemSummary {
    pub total_users: usize,
    pub total_house_helps: usize,
    pub total_admins: usize,
    /// Reach-outs received by non-administrator accounts
    pub total_reach_outs_sent: usize,
}

impl SystemSummary {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let (admins, house_helps): (Vec<&Account>, Vec<&Account>) =
            accounts.iter().partition(|account| account.is_admin());

        Self {
            total_users: accounts.len(),
            total_house_helps: house_helps.len(),
            total_admins: admins.len(),
            total_reach_outs_sent: house_helps.iter().map(|a| a.reach_out_count()).sum(),
        }
    }
}

/// Admin service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_admins(&self) -> AppResult<Vec<Account>>;

    /// Non-administrators, optionally filtered by a case-sensitive username term
    async fn list_house_helps(&self, search_term: Option<String>) -> AppResult<Vec<Account>>;

    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    ) -> AppResult<AdminCreation>;

    async fn delete_account(&self, account_id: Uuid) -> DeleteOutcome;

    async fn system_summary(&self) -> AppResult<SystemSummary>;
}

/// Concrete implementation of AdminService using Unit of Work.
pub struct AdminConsole<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminConsole<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Create the role on first use, then grant it
pub(crate) async fn grant_role(
    repo: &dyn AccountRepository,
    account_id: Uuid,
    role: Role,
) -> AppResult<()> {
    if !repo.role_exists(role).await? {
        repo.create_role(role).await?;
        tracing::info!(role = %role, "Role created");
    }
    repo.add_to_role(account_id, role).await
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminConsole<U> {
    async fn list_admins(&self) -> AppResult<Vec<Account>> {
        let accounts = self.uow.accounts().list().await?;
        Ok(accounts.into_iter().filter(Account::is_admin).collect())
    }

    async fn list_house_helps(&self, search_term: Option<String>) -> AppResult<Vec<Account>> {
        let accounts = self.uow.accounts().list().await?;
        Ok(accounts
            .into_iter()
            .filter(Account::is_house_help)
            .filter(|account| {
                search_term
                    .as_deref()
                    .map_or(true, |term| account.username.contains(term))
            })
            .collect())
    }

    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    ) -> AppResult<AdminCreation> {
        if password != confirm_password {
            return Err(AppError::validation(MSG_PASSWORDS_DO_NOT_MATCH));
        }

        let accounts = self.uow.accounts();
        let account = identity::create_account(accounts.as_ref(), &username, &email, &password).await?;

        match grant_role(accounts.as_ref(), account.id, Role::Administrator).await {
            Ok(()) => {
                tracing::info!(account_id = %account.id, username = %account.username, "Administrator created");
                let mut account = account;
                account.roles.push(Role::Administrator);
                Ok(AdminCreation::Created(account))
            }
            Err(e) => {
                tracing::error!(account_id = %account.id, error = %e, "Administrator role not assigned");
                Ok(AdminCreation::Unprivileged {
                    account,
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn delete_account(&self, account_id: Uuid) -> DeleteOutcome {
        let accounts = self.uow.accounts();

        match accounts.find_by_id(account_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return DeleteOutcome::NotFound,
            Err(e) => {
                tracing::error!(%account_id, error = %e, "Account lookup failed");
                return DeleteOutcome::Failed;
            }
        }

        match accounts.delete(account_id).await {
            Ok(()) => {
                tracing::info!(%account_id, "Account deleted");
                DeleteOutcome::Removed
            }
            Err(AppError::NotFound) => DeleteOutcome::NotFound,
            Err(e) => {
                tracing::error!(%account_id, error = ?e, "Account deletion failed");
                DeleteOutcome::Failed
            }
        }
    }

    async fn system_summary(&self) -> AppResult<SystemSummary> {
        let accounts = self.uow.accounts().list().await?;
        Ok(SystemSummary::from_accounts(&accounts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockAccountRepository;
    use crate::services::test_support::{account, admin, with_reach_outs, TestUnitOfWork};

    fn fresh_identity(repo: &mut MockAccountRepository) {
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|new| Ok(account(&new.username)));
    }

    #[tokio::test]
    async fn test_list_partitions_by_role() {
        let mut repo = MockAccountRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![admin("root"), account("jane"), account("janet"), account("mary")])
        });

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let admins = service.list_admins().await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username, "root");

        let all = service.list_house_helps(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = service
            .list_house_helps(Some("jan".to_string()))
            .await
            .unwrap();
        let names: Vec<_> = filtered.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["jane", "janet"]);
    }

    #[tokio::test]
    async fn test_create_admin_creates_role_when_absent() {
        let mut repo = MockAccountRepository::new();
        fresh_identity(&mut repo);
        repo.expect_role_exists().returning(|_| Ok(false));
        repo.expect_create_role()
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_add_to_role()
            .withf(|_, role| *role == Role::Administrator)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let created = service
            .create_admin(
                "root".to_string(),
                "root@x.com".to_string(),
                "Secret1!".to_string(),
                "Secret1!".to_string(),
            )
            .await
            .unwrap();

        match created {
            AdminCreation::Created(account) => assert!(account.is_admin()),
            other => panic!("expected created admin, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_admin_password_mismatch() {
        let mut repo = MockAccountRepository::new();
        repo.expect_create().never();

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let err = service
            .create_admin(
                "root".to_string(),
                "root@x.com".to_string(),
                "Secret1!".to_string(),
                "Secret2!".to_string(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.messages(), vec![MSG_PASSWORDS_DO_NOT_MATCH]);
    }

    #[tokio::test]
    async fn test_create_admin_reports_unprivileged_account() {
        let mut repo = MockAccountRepository::new();
        fresh_identity(&mut repo);
        repo.expect_role_exists().returning(|_| Ok(true));
        repo.expect_add_to_role()
            .returning(|_, _| Err(AppError::internal("role table locked")));

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let created = service
            .create_admin(
                "root".to_string(),
                "root@x.com".to_string(),
                "Secret1!".to_string(),
                "Secret1!".to_string(),
            )
            .await
            .unwrap();

        assert!(matches!(created, AdminCreation::Unprivileged { .. }));
        assert!(!created.account().is_admin());
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let existing = account("jane");
        let existing_id = existing.id;

        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            Ok((id == existing_id).then(|| existing.clone()))
        });
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let removed = service.delete_account(existing_id).await;
        assert_eq!(removed, DeleteOutcome::Removed);
        assert_eq!(removed.message(), MSG_ACCOUNT_REMOVED);

        let missing = service.delete_account(Uuid::new_v4()).await;
        assert_eq!(missing, DeleteOutcome::NotFound);
        assert_eq!(missing.message(), "User Not Found");
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id()
            .returning(|id| {
                let mut found = account("jane");
                found.id = id;
                Ok(Some(found))
            });
        repo.expect_delete()
            .returning(|_| Err(AppError::internal("disk full")));

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let outcome = service.delete_account(Uuid::new_v4()).await;
        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(outcome.message(), MSG_DELETE_FAILED);
    }

    #[tokio::test]
    async fn test_system_summary_counts() {
        let mut repo = MockAccountRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                with_reach_outs(account("jane"), 3),
                account("mary"),
                with_reach_outs(admin("root"), 2),
            ])
        });

        let service = AdminConsole::new(TestUnitOfWork::new(repo));
        let summary = service.system_summary().await.unwrap();

        assert_eq!(
            summary,
            SystemSummary {
                total_users: 3,
                total_house_helps: 2,
                total_admins: 1,
                total_reach_outs_sent: 3,
            }
        );
    }
}
