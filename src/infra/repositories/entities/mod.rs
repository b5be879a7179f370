//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod account;
pub mod account_role;
pub mod reach_out;
pub mod role;
