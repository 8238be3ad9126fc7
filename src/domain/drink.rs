//! Drink domain model

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One ingredient of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Ingredient {
    /// Display color used to draw the ingredient's layer
    #[validate(length(min = 1, message = "Ingredient color is required"))]
    pub color: String,
    #[validate(length(min = 1, message = "Ingredient name is required"))]
    pub name: String,
    /// Relative amount of this ingredient
    #[validate(range(min = 1, message = "Ingredient parts must be at least 1"))]
    pub parts: u32,
}

/// Ingredient without its name (short form)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: u32,
}

impl From<&Ingredient> for IngredientSummary {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            color: ingredient.color.clone(),
            parts: ingredient.parts,
        }
    }
}

/// Drink entity. Serializes as the long form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Short form of a drink: enough to draw it on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

impl Drink {
    pub fn short(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.iter().map(IngredientSummary::from).collect(),
        }
    }
}

/// Row as stored in the `drinks` table, recipe still serialized
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: i64,
    pub title: String,
    pub recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = AppError;

    fn try_from(row: DrinkRow) -> Result<Self> {
        let recipe = parse_recipe(&row.recipe).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Drink {} has an unreadable recipe: {}", row.id, e))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            recipe,
        })
    }
}

/// Serialize a recipe for the `drinks.recipe` column
pub fn serialize_recipe(recipe: &[Ingredient]) -> Result<String> {
    serde_json::to_string(recipe).map_err(|e| AppError::Internal(e.into()))
}

pub fn parse_recipe(recipe: &str) -> serde_json::Result<Vec<Ingredient>> {
    serde_json::from_str(recipe)
}

/// Input for creating a drink
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDrinkInput {
    #[validate(length(min = 1, max = 80, message = "Title must be 1-80 characters"))]
    pub title: String,
    #[validate(
        length(min = 1, message = "Recipe must contain at least one ingredient"),
        nested
    )]
    pub recipe: Vec<Ingredient>,
}

impl CreateDrinkInput {
    /// Trim surrounding whitespace from the title
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDrinkInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 80, message = "Title must be 1-80 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Recipe must contain at least one ingredient"),
        nested
    )]
    pub recipe: Option<Vec<Ingredient>>,
}

impl UpdateDrinkInput {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}
