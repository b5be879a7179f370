//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Seed and start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Default administrator bootstrap

pub mod args;

pub use args::{Cli, Commands};
