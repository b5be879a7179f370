//! Domain layer - Core business entities and logic
//!
//! Accounts, their roles and the reach-out requests they receive,
//! independent of storage and transport.

pub mod account;
pub mod password;
pub mod reach_out;
pub mod role;

pub use account::{
    Account, AccountResponse, AccountSummary, LoginSummary, NewAccount, ProfileView,
};
pub use password::{Password, PasswordPolicy};
pub use reach_out::ReachOut;
pub use role::{Role, UnknownRole};
