//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AccountService, AdminService, AuthService, DirectoryService, ReachOutService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get account self-service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get public directory service
    fn directory(&self) -> Arc<dyn DirectoryService>;

    /// Get reach-out service
    fn reach_outs(&self) -> Arc<dyn ReachOutService>;

    /// Get admin service
    fn admin(&self) -> Arc<dyn AdminService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    account_service: Arc<dyn AccountService>,
    directory_service: Arc<dyn DirectoryService>,
    reach_out_service: Arc<dyn ReachOutService>,
    admin_service: Arc<dyn AdminService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        account_service: Arc<dyn AccountService>,
        directory_service: Arc<dyn DirectoryService>,
        reach_out_service: Arc<dyn ReachOutService>,
        admin_service: Arc<dyn AdminService>,
    ) -> Self {
        Self {
            auth_service,
            account_service,
            directory_service,
            reach_out_service,
            admin_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{AccountManager, AdminConsole, Authenticator, Directory, ReachOutDesk};

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            account_service: Arc::new(AccountManager::new(uow.clone())),
            directory_service: Arc::new(Directory::new(uow.clone())),
            reach_out_service: Arc::new(ReachOutDesk::new(uow.clone())),
            admin_service: Arc::new(AdminConsole::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn directory(&self) -> Arc<dyn DirectoryService> {
        self.directory_service.clone()
    }

    fn reach_outs(&self) -> Arc<dyn ReachOutService> {
        self.reach_out_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }
}
