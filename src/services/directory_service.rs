//! Public directory of available househelp.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::AccountSummary;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Directory service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Available accounts, optionally narrowed by a case-sensitive search term
    async fn list_available(&self, search_term: Option<String>) -> AppResult<Vec<AccountSummary>>;
}

/// Concrete implementation of DirectoryService using Unit of Work.
pub struct Directory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Directory<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DirectoryService for Directory<U> {
    async fn list_available(&self, search_term: Option<String>) -> AppResult<Vec<AccountSummary>> {
        let term = search_term.filter(|term| !term.is_empty());

        let listed: Vec<AccountSummary> = self
            .uow
            .accounts()
            .list()
            .await?
            .into_iter()
            .filter(|account| account.is_available)
            .filter(|account| term.as_deref().map_or(true, |t| account.matches_search(t)))
            .map(AccountSummary::from)
            .collect();

        tracing::debug!(search = ?term, count = listed.len(), "Listed available househelp");
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockAccountRepository;
    use crate::services::test_support::{account, TestUnitOfWork};

    fn directory() -> Directory<TestUnitOfWork> {
        let mut available = account("jane");
        available.is_available = true;
        available.description = Some("Cooking and laundry".to_string());

        let mut named = account("mary");
        named.is_available = true;
        named.name = Some("Mary Cook".to_string());

        let hidden = account("cookie");

        let mut repo = MockAccountRepository::new();
        repo.expect_list()
            .returning(move || Ok(vec![available.clone(), named.clone(), hidden.clone()]));
        Directory::new(TestUnitOfWork::new(repo))
    }

    #[tokio::test]
    async fn test_unavailable_accounts_are_hidden() {
        let listed = directory().list_available(None).await.unwrap();
        let names: Vec<_> = listed.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["jane", "mary"]);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_description() {
        let listed = directory()
            .list_available(Some("Cook".to_string()))
            .await
            .unwrap();
        let names: Vec<_> = listed.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["jane", "mary"]);

        let listed = directory()
            .list_available(Some("laundry".to_string()))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].username, "jane");
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive() {
        let listed = directory()
            .list_available(Some("cook".to_string()))
            .await
            .unwrap();
        // "Cooking" and "Mary Cook" differ in case; the unavailable "cookie" stays hidden
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_empty_term_lists_everyone_available() {
        let listed = directory()
            .list_available(Some(String::new()))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }
}
