//! Unit of Work - single access point to the repositories.
//!
//! Services depend on this trait rather than on concrete stores so the
//! whole data layer can be swapped for mocks in tests.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{AccountRepository, AccountStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    account_repo: Arc<AccountStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            account_repo: Arc::new(AccountStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }
}
