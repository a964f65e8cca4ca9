//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs (including the unique `submission` column of the metadata table).

use crate::entities::{Group, PluginConfig, SubmissionMeta};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Fallback when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/assignmeta.sqlite";

/// Gets the database URL from the environment (a `.env` file is honoured) or
/// returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the plugin's tables if they do not exist yet.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut meta_table = schema.create_table_from_entity(SubmissionMeta);
    let mut config_table = schema.create_table_from_entity(PluginConfig);
    let mut group_table = schema.create_table_from_entity(Group);

    meta_table.if_not_exists();
    config_table.if_not_exists();
    group_table.if_not_exists();

    db.execute(builder.build(&meta_table)).await?;
    db.execute(builder.build(&config_table)).await?;
    db.execute(builder.build(&group_table)).await?;

    info!("Database tables ensured.");
    Ok(())
}
