//! Database schema command.
//!
//! Applies the embedded migrations from `crates/web/migrations/`. The server
//! also does this at startup; this command exists for setting a database up
//! out of band.

use cuppa_web::db;

use super::database_url;

/// Create the schema if absent.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url();

    tracing::info!(url = %database_url, "Connecting to database");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Applying schema migrations");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
