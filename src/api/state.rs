//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AccountService, AdminService, AuthService, DirectoryService, ReachOutService,
    ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Account self-service
    pub account_service: Arc<dyn AccountService>,
    /// Public directory
    pub directory_service: Arc<dyn DirectoryService>,
    /// Reach-out requests
    pub reach_out_service: Arc<dyn ReachOutService>,
    /// Admin dashboard
    pub admin_service: Arc<dyn AdminService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Whether session cookies carry the `Secure` attribute
    pub cookie_secure: bool,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let cookie_secure = config.cookie_secure;
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database, cookie_secure)
    }

    /// Create application state from any service container.
    pub fn new(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            account_service: container.accounts(),
            directory_service: container.directory(),
            reach_out_service: container.reach_outs(),
            admin_service: container.admin(),
            database,
            cookie_secure,
        }
    }
}
