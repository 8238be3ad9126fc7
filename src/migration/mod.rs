//! Database initialization
//!
//! Runs once at process start, before the server binds:
//! - create the database if it does not exist
//! - apply the migrations under `migrations/`
//! - optionally wipe the `drinks` table and seed a single drink

use crate::config::Config;
use crate::domain::{serialize_recipe, Ingredient};
use anyhow::{Context, Result};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{Executor, MySql, MySqlPool, Pool};
use tracing::{info, warn};
use url::Url;

/// Title of the drink seeded by a reset
pub const SEED_TITLE: &str = "water";

/// Split a DATABASE_URL into the server URL and the database name
fn split_database_url(database_url: &str) -> Result<(String, String)> {
    let mut url = Url::parse(database_url).context("Invalid DATABASE_URL")?;
    let db_name = url.path().trim_start_matches('/').to_string();
    if db_name.is_empty() || db_name.contains('/') {
        anyhow::bail!("Invalid DATABASE_URL: no database name");
    }
    url.set_path("");
    Ok((url.to_string(), db_name))
}

/// Ensure database exists, create if not
async fn ensure_database_exists(config: &Config) -> Result<()> {
    let (base_url, db_name) = split_database_url(&config.database.url)?;

    info!("Connecting to MySQL server...");
    let pool: Pool<MySql> = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(&base_url)
        .await
        .context("Failed to connect to MySQL server")?;

    info!("Creating database '{}' if not exists...", db_name);
    let query = format!("CREATE DATABASE IF NOT EXISTS `{}`", db_name.replace('`', "``"));
    pool.execute(query.as_str())
        .await
        .context("Failed to create database")?;

    pool.close().await;
    Ok(())
}

/// Run database migrations
pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations completed");
    Ok(())
}

/// Drop every drink and start over with a single `water` drink
pub async fn reset_database(pool: &MySqlPool) -> Result<()> {
    warn!("Resetting database: all drinks will be removed");

    pool.execute("TRUNCATE TABLE drinks")
        .await
        .context("Failed to truncate drinks")?;

    let recipe = serialize_recipe(&[Ingredient {
        color: "blue".to_string(),
        name: "water".to_string(),
        parts: 1,
    }])?;

    sqlx::query("INSERT INTO drinks (title, recipe) VALUES (?, ?)")
        .bind(SEED_TITLE)
        .bind(recipe)
        .execute(pool)
        .await
        .context("Failed to seed drinks")?;

    info!("Database reset, seeded '{}'", SEED_TITLE);
    Ok(())
}

/// Prepare the database for serving. Called once at startup.
pub async fn init_database(config: &Config, reset: bool) -> Result<()> {
    ensure_database_exists(config).await?;

    info!("Connecting to database...");
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool).await?;
    if reset {
        reset_database(&pool).await?;
    }

    pool.close().await;
    Ok(())
}
