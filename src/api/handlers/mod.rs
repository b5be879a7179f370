//! HTTP request handlers.

pub mod account_handler;
pub mod admin_handler;
pub mod home_handler;
pub mod househelp_handler;

pub use account_handler::{account_routes, account_session_routes};
pub use admin_handler::admin_routes;
pub use home_handler::home_routes;
pub use househelp_handler::{househelp_owner_routes, househelp_routes};
