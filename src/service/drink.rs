//! Drink business logic

use crate::domain::{CreateDrinkInput, Drink, DrinkSummary, UpdateDrinkInput};
use crate::error::{AppError, Result};
use crate::repository::DrinkRepository;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct DrinkService<R: DrinkRepository> {
    repo: Arc<R>,
}

impl<R: DrinkRepository> DrinkService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn list_all(&self) -> Result<Vec<Drink>> {
        let drinks = self.repo.list().await?;
        if drinks.is_empty() {
            return Err(AppError::NotFound("No drinks found".to_string()));
        }
        Ok(drinks)
    }

    /// Every drink in short form. An empty menu is reported as NotFound.
    pub async fn list_short(&self) -> Result<Vec<DrinkSummary>> {
        Ok(self.list_all().await?.iter().map(Drink::short).collect())
    }

    /// Every drink in long form. An empty menu is reported as NotFound.
    pub async fn list_long(&self) -> Result<Vec<Drink>> {
        self.list_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Drink> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Drink {} not found", id)))
    }

    pub async fn create(&self, input: CreateDrinkInput) -> Result<Drink> {
        let input = input.normalized();
        input.validate()?;

        let drink = self.repo.create(&input).await?;
        info!(drink_id = drink.id, title = %drink.title, "Drink created");
        Ok(drink)
    }

    pub async fn update(&self, id: i64, input: UpdateDrinkInput) -> Result<Drink> {
        if input.is_empty() {
            return Err(AppError::BadRequest(
                "Request must include a title or a recipe".to_string(),
            ));
        }
        let input = input.normalized();
        input.validate()?;

        // Verify drink exists
        let _ = self.get(id).await?;

        let drink = self.repo.update(id, &input).await?;
        info!(drink_id = drink.id, "Drink updated");
        Ok(drink)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Drink {} not found", id)));
        }
        info!(drink_id = id, "Drink deleted");
        Ok(())
    }
}
