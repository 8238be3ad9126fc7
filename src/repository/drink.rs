//! Drink repository

use crate::domain::{serialize_recipe, CreateDrinkInput, Drink, DrinkRow, UpdateDrinkInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DrinkRepository: Send + Sync {
    /// List every drink, ordered by id
    async fn list(&self) -> Result<Vec<Drink>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Drink>>;

    /// Insert a drink and return it with its generated id
    async fn create(&self, input: &CreateDrinkInput) -> Result<Drink>;

    /// Apply the supplied fields; fails with NotFound if the drink is gone
    async fn update(&self, id: i64, input: &UpdateDrinkInput) -> Result<Drink>;

    /// Delete a drink. Returns false if no row matched.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct DrinkRepositoryImpl {
    pool: MySqlPool,
}

impl DrinkRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Turn a duplicate-title constraint violation into a validation error
fn map_write_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Validation("A drink with this title already exists".to_string())
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl DrinkRepository for DrinkRepositoryImpl {
    async fn list(&self) -> Result<Vec<Drink>> {
        let rows = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Drink::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Drink>> {
        let row = sqlx::query_as::<_, DrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Drink::try_from).transpose()
    }

    async fn create(&self, input: &CreateDrinkInput) -> Result<Drink> {
        let recipe = serialize_recipe(&input.recipe)?;

        let result = sqlx::query("INSERT INTO drinks (title, recipe) VALUES (?, ?)")
            .bind(&input.title)
            .bind(&recipe)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Failed to read back drink {}", id))
        })
    }

    async fn update(&self, id: i64, input: &UpdateDrinkInput) -> Result<Drink> {
        let recipe = input
            .recipe
            .as_deref()
            .map(serialize_recipe)
            .transpose()?;

        sqlx::query(
            r#"
            UPDATE drinks
            SET title = COALESCE(?, title),
                recipe = COALESCE(?, recipe)
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&recipe)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        // MySQL reports zero affected rows for no-op updates, so re-read instead
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Drink {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
