//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over SeaORM entities
//! - Unit of Work giving services their repositories

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{AccountRepository, AccountStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockAccountRepository;
