//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access.

mod account_service;
mod admin_service;
mod auth_service;
pub mod container;
mod directory_service;
mod identity;
mod reach_out_service;
mod seed;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{AccountManager, AccountService, ProfileEdit};
pub use admin_service::{AdminConsole, AdminCreation, AdminService, DeleteOutcome, SystemSummary};
pub use auth_service::{AuthService, Authenticator, Claims, SessionToken};
pub use directory_service::{Directory, DirectoryService};
pub use reach_out_service::{ReachOutDesk, ReachOutReceipt, ReachOutService};
pub use seed::{SeedReport, Seeder};

#[cfg(any(test, feature = "test-utils"))]
pub use account_service::MockAccountService;
#[cfg(any(test, feature = "test-utils"))]
pub use admin_service::MockAdminService;
#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use directory_service::MockDirectoryService;
#[cfg(any(test, feature = "test-utils"))]
pub use reach_out_service::MockReachOutService;
