//! API middleware.

mod auth;

pub use auth::{auth_middleware, require_admin, session_token, CurrentUser};
