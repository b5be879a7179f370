//! Seed command - Bootstraps the default administrator.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{SeedReport, Seeder};

/// Run the seeding step against an already migrated database
pub async fn seed(db: &Database, config: &Config) -> AppResult<SeedReport> {
    let seeder = Seeder::new(Arc::new(Persistence::new(db.get_connection())));
    let report = seeder.seed_default_admin(&config.seed_admin).await?;

    tracing::info!(
        role_created = report.role_created,
        admin_created = report.admin_created,
        "Seeding finished"
    );
    Ok(report)
}

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;
    seed(&db, &config).await?;
    Ok(())
}
