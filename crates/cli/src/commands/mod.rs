//! CLI subcommands.

pub mod migrate;
pub mod seed;

use cuppa_web::config::DEFAULT_DATABASE_URL;

/// Resolve the database URL the same way the server does.
pub fn database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("CUPPA_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned())
}
