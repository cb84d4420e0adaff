//! Database migration command.
//!
//! Applies the migrations in `crates/api/migrations/` (embedded at build
//! time) to the database named by `SHOP_DATABASE_URL`.

use mini_shop_api::db;
use tracing::info;

use super::{CommandError, database_url};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    db::run_migrations(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
